use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::TypeDescriptor;
use crate::ops::{ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Inspect

/// The foundational trait of the copy engine.
///
/// An `Inspect` value carries its own [`TypeDescriptor`] and can expose its
/// runtime shape through [`shape`]/[`shape_mut`], which is all the
/// [graph copier](crate::deep_copy) needs to reconstruct it. Classification
/// is structural: a field declared as a general value may hold a map or an
/// array at runtime, and it is the runtime shape that decides how the value
/// is copied.
///
/// # Implementing
///
/// Scalars, text, common containers, fixed arrays, [`DynArray`] and
/// [`Shared<T>`] handles are implemented by this crate. Caller-supplied
/// object types implement [`Typed`] (the descriptor, built once in a
/// [`DescriptorCell`]), `Inspect`, and [`Object`] (the positional
/// field-read/field-write protocol). No trait here requires `Send` or
/// `Sync`: the engine is single-threaded and handles are [`Rc`]-based.
///
/// [`shape`]: Inspect::shape
/// [`shape_mut`]: Inspect::shape_mut
/// [`Typed`]: crate::info::Typed
/// [`DescriptorCell`]: crate::info::DescriptorCell
/// [`Object`]: crate::ops::Object
/// [`DynArray`]: crate::ops::DynArray
/// [`Shared<T>`]: crate::ops::Shared
/// [`Rc`]: alloc::rc::Rc
pub trait Inspect: Any {
    /// Returns the descriptor of this value's type.
    ///
    /// Implementations forward to [`Typed::type_descriptor`](crate::info::Typed::type_descriptor).
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Returns the runtime shape of this value.
    fn shape(&self) -> ValueRef<'_>;

    /// Returns the mutable runtime shape of this value.
    fn shape_mut(&mut self) -> ValueMut<'_>;

    /// Casts this type to a fully-inspectable value.
    #[inline(always)]
    fn as_inspect(&self) -> &dyn Inspect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-inspectable value.
    #[inline(always)]
    fn as_inspect_mut(&mut self) -> &mut dyn Inspect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed, fully-inspectable value.
    #[inline(always)]
    fn into_inspect(self: Box<Self>) -> Box<dyn Inspect>
    where
        Self: Sized,
    {
        self
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// `Box<dyn Inspect>::type_id` reports the container's id, not the inner
    /// value's, which is prone to errors; use this method instead.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns an equality comparison following the type's own contract.
    ///
    /// Returns `None` if the underlying type supports no equality testing.
    /// The engine itself never relies on this; it exists so external callers
    /// can compare a copy against its source.
    #[inline]
    fn value_eq(&self, _other: &dyn Inspect) -> Option<bool> {
        None
    }

    /// Returns a hash of the value, stable across program runs.
    ///
    /// Uses [`value_hasher`](crate::hash::value_hasher) internally. Returns
    /// `None` if the underlying type supports no hashing.
    #[inline]
    fn value_hash(&self) -> Option<u64> {
        None
    }

    /// Debug formatter for the value, derived from its shape.
    ///
    /// Handles print their address rather than their content, so formatting
    /// stays terminating on cyclic graphs.
    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape() {
            ValueRef::Scalar(value) => value.fmt_value(f),
            ValueRef::Text(text) => fmt::Debug::fmt(text.as_str(), f),
            ValueRef::Object(object) => {
                let mut dbg = f.debug_struct(self.descriptor().type_name());
                if let Some(info) = self.descriptor().as_object() {
                    for (index, field) in info.fields().iter().enumerate() {
                        match object.field_at(index) {
                            Some(value) => dbg.field(field.name(), &value),
                            None => dbg.field(field.name(), &format_args!("null")),
                        };
                    }
                }
                dbg.finish()
            }
            ValueRef::Map(map) => f.debug_map().entries(map.iter()).finish(),
            ValueRef::Sequence(seq) => f.debug_list().entries(seq.iter()).finish(),
            ValueRef::Array(array) => f
                .debug_list()
                .entries((0..array.len()).map(|index| array.get(index)))
                .finish(),
            ValueRef::Reference(handle) => write!(f, "Shared(0x{:x})", handle.address()),
        }
    }
}

impl dyn Inspect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// Returns `None` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// Returns `None` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// Returns `Err(self)` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Inspect>) -> Result<Box<T>, Box<dyn Inspect>> {
        if self.is::<T>() {
            // `is` has already verified the type.
            let erased: Box<dyn Any> = self;
            Ok(erased.downcast::<T>().expect("type already checked"))
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// Returns `Err(self)` if the underlying value is not of type `T`.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Inspect>) -> Result<T, Box<dyn Inspect>> {
        self.downcast::<T>().map(|boxed| *boxed)
    }
}

impl fmt::Debug for dyn Inspect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug_fmt(f)
    }
}
