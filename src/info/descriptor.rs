use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::slice;

use crate::info::{Constructor, FieldDescriptor, ScalarKind};

// -----------------------------------------------------------------------------
// Type

/// The identity of a Rust type: its [`TypeId`] plus its diagnostic name.
#[derive(Clone, Copy, Debug)]
pub struct Type {
    id: TypeId,
    name: &'static str,
}

impl Type {
    /// Returns the identity of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// -----------------------------------------------------------------------------
// ValueKind

/// The shape a [`TypeDescriptor`] declares for its values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Text,
    Object,
    Map,
    Sequence,
    Array,
    Reference,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Text => "text",
            Self::Object => "object",
            Self::Map => "map",
            Self::Sequence => "sequence",
            Self::Array => "array",
            Self::Reference => "reference",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Compile-time metadata of a type, as one closed enumeration over value
/// kinds.
///
/// Built once per type (per instantiation for generics) inside a
/// [`DescriptorCell`](crate::info::DescriptorCell) or
/// [`GenericDescriptorCell`](crate::info::GenericDescriptorCell) and handed
/// out as `&'static` from [`Typed::type_descriptor`](crate::info::Typed::type_descriptor).
#[derive(Debug)]
pub enum TypeDescriptor {
    Scalar(ScalarDescriptor),
    Text(TextDescriptor),
    Object(ObjectDescriptor),
    Map(MapDescriptor),
    Sequence(SequenceDescriptor),
    Array(ArrayDescriptor),
    Reference(ReferenceDescriptor),
}

impl TypeDescriptor {
    /// Returns the identity of the described type.
    pub const fn ty(&self) -> Type {
        match self {
            Self::Scalar(info) => info.ty,
            Self::Text(info) => info.ty,
            Self::Object(info) => info.ty,
            Self::Map(info) => info.ty,
            Self::Sequence(info) => info.ty,
            Self::Array(info) => info.ty,
            Self::Reference(info) => info.ty,
        }
    }

    /// Returns the full name of the described type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the declared value kind.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Text(_) => ValueKind::Text,
            Self::Object(_) => ValueKind::Object,
            Self::Map(_) => ValueKind::Map,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Array(_) => ValueKind::Array,
            Self::Reference(_) => ValueKind::Reference,
        }
    }

    /// Returns the registered constructors, possibly empty.
    ///
    /// Only scalars and objects register constructors; containers, text,
    /// arrays and handles are rebuilt structurally and never synthesized.
    pub fn constructors(&self) -> &[Constructor] {
        match self {
            Self::Scalar(info) => slice::from_ref(&info.constructor),
            Self::Object(info) => info.constructors(),
            _ => &[],
        }
    }

    /// Returns the object metadata if this describes an object type.
    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectDescriptor> {
        match self {
            Self::Object(info) => Some(info),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarDescriptor

/// Metadata of a scalar type.
#[derive(Debug)]
pub struct ScalarDescriptor {
    ty: Type,
    kind: ScalarKind,
    constructor: Constructor,
}

impl ScalarDescriptor {
    /// Creates the descriptor of scalar type `T`.
    ///
    /// The constructor is the scalar's value pass-through; it receives the
    /// source value as its single seed when the source is a matching scalar,
    /// and the kind's zero otherwise.
    pub fn new<T: Any>(kind: ScalarKind, constructor: Constructor) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            constructor,
        }
    }

    /// Returns the scalar kind.
    #[inline]
    pub const fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// ObjectDescriptor

/// Metadata of an object type: its declared fields, in protocol order, and
/// its registered constructors.
#[derive(Debug)]
pub struct ObjectDescriptor {
    ty: Type,
    fields: Box<[FieldDescriptor]>,
    constructors: Box<[Constructor]>,
}

impl ObjectDescriptor {
    /// Creates the descriptor of object type `T`.
    ///
    /// Field order here fixes the indices the
    /// [`Object`](crate::ops::Object) protocol uses.
    pub fn new<T: Any>(
        fields: impl IntoIterator<Item = FieldDescriptor>,
        constructors: impl IntoIterator<Item = Constructor>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into_iter().collect(),
            constructors: constructors.into_iter().collect(),
        }
    }

    /// Returns the declared fields.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the number of declared fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the index of the named field, if declared.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the registered constructors.
    #[inline]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}

// -----------------------------------------------------------------------------
// Structural descriptors

macro_rules! simple_descriptor {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            ty: Type,
        }

        impl $name {
            #[doc = concat!("Creates the descriptor of type `T`.")]
            pub fn new<T: Any>() -> Self {
                Self { ty: Type::of::<T>() }
            }
        }
    };
}

simple_descriptor!(
    /// Metadata of a text type.
    TextDescriptor
);
simple_descriptor!(
    /// Metadata of a map type. Values copy deep, keys copy shallow.
    MapDescriptor
);
simple_descriptor!(
    /// Metadata of a sequence type. Elements copy shallow.
    SequenceDescriptor
);
simple_descriptor!(
    /// Metadata of a positional array type.
    ArrayDescriptor
);
simple_descriptor!(
    /// Metadata of a shared-handle type.
    ReferenceDescriptor
);
