use bitflags::bitflags;

bitflags! {
    /// Modifier flags of a declared field.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FieldFlags: u8 {
        /// The field belongs to the type, not the instance. Never copied.
        const STATIC = 1 << 0;
        /// The field is excluded from persistence and copying.
        const TRANSIENT = 1 << 1;
        /// The field exists on the instance but refuses external writes.
        /// Copying logs the refusal and leaves the constructor default.
        const RESTRICTED = 1 << 2;
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A single declared field of an object type.
///
/// The engine addresses fields by their position in the owning
/// [`ObjectDescriptor`](crate::info::ObjectDescriptor); the name exists for
/// diagnostics and debug formatting.
#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    flags: FieldFlags,
}

impl FieldDescriptor {
    /// Creates a descriptor of an ordinary copyable field.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            flags: FieldFlags::empty(),
        }
    }

    /// Replaces the modifier flags.
    pub const fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the modifier flags.
    #[inline]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    /// Returns `true` if the copier must skip this field entirely.
    #[inline]
    pub const fn is_excluded(&self) -> bool {
        self.flags
            .intersects(FieldFlags::STATIC.union(FieldFlags::TRANSIENT))
    }

    /// Returns `true` if the field refuses writes.
    #[inline]
    pub const fn is_restricted(&self) -> bool {
        self.flags.contains(FieldFlags::RESTRICTED)
    }
}
