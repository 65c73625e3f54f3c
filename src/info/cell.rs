use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, RwLock};

use crate::hash::HashMap;
use crate::info::TypeDescriptor;

// -----------------------------------------------------------------------------
// DescriptorCell

/// A container over a lazily-initialized [`TypeDescriptor`] of a
/// non-generic type.
///
/// Stored in a `static` next to the owning type's
/// [`Typed`](crate::info::Typed) impl, so the descriptor is built exactly
/// once and handed out as `&'static` thereafter.
pub struct DescriptorCell(OnceLock<TypeDescriptor>);

impl DescriptorCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the contained descriptor, initializing it with `f` on first
    /// access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeDescriptor) -> &TypeDescriptor {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescriptorCell

/// A container over the lazily-initialized [`TypeDescriptor`]s of a generic
/// type, one per monomorphization.
///
/// Descriptors are leaked on first access; a generic type has a small, fixed
/// set of instantiations per program, so the leak is bounded.
pub struct GenericDescriptorCell(OnceLock<RwLock<HashMap<TypeId, &'static TypeDescriptor>>>);

impl GenericDescriptorCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the descriptor of the instantiation `T`, initializing it with
    /// `f` on first access.
    pub fn get_or_insert<T: Any>(
        &self,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        let id = TypeId::of::<T>();
        let lock = self.0.get_or_init(Default::default);

        let mapping = lock.read().unwrap_or_else(|err| err.into_inner());
        if let Some(&descriptor) = mapping.get(&id) {
            return descriptor;
        }
        drop(mapping);

        let mut mapping = lock.write().unwrap_or_else(|err| err.into_inner());
        *mapping.entry(id).or_insert_with(|| Box::leak(Box::new(f())))
    }
}
