use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Ref, RefCell, RefMut};

use crate::info::{GenericDescriptorCell, ReferenceDescriptor, TypeDescriptor, Typed};
use crate::inspect::Inspect;
use crate::ops::{ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Reference

/// An operations trait of shared-handle values.
///
/// A handle has an identity (its [`address`](Reference::address)) separate
/// from the value it points at. The copier uses addresses to recognize a
/// field that points back at the value being copied, and rewires such a
/// field to the copy's own handle instead of recursing forever.
pub trait Reference: Inspect {
    /// Returns the identity of the pointed-at allocation.
    ///
    /// Two handles share one value exactly when their addresses are equal.
    fn address(&self) -> usize;

    /// Borrows the pointed-at value.
    fn borrow_value(&self) -> Ref<'_, dyn Inspect>;

    /// Mutably borrows the pointed-at value.
    fn borrow_value_mut(&self) -> RefMut<'_, dyn Inspect>;

    /// Creates a fresh handle of the same concrete type owning `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` does not hold the pointed-at type, which indicates
    /// a copier bug rather than caller misuse.
    fn adopt(&self, value: Box<dyn Inspect>) -> Box<dyn Inspect>;

    /// Returns another handle to the same value.
    fn share(&self) -> Box<dyn Inspect>;
}

// -----------------------------------------------------------------------------
// Shared

/// A shared, mutable handle to a value.
///
/// Cloning a `Shared` shares the value; the engine is single-threaded, so
/// the handle is [`Rc`]-based and not sendable.
pub struct Shared<T: Inspect>(Rc<RefCell<T>>);

impl<T: Inspect> Shared<T> {
    /// Creates a handle owning `value`.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrows the value.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrows the value.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns the identity of the owned allocation.
    #[inline]
    pub fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// Returns `true` if both handles share one value.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Inspect> Clone for Shared<T> {
    /// Shares the value; no copy of `T` is made.
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Inspect + PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.borrow() == *other.borrow()
    }
}

impl<T: Inspect> core::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.debug_fmt(f)
    }
}

impl<T: Inspect> Typed for Shared<T> {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeDescriptor::Reference(ReferenceDescriptor::new::<Self>())
        })
    }
}

impl<T: Inspect> Inspect for Shared<T> {
    #[inline]
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    #[inline]
    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Reference(self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Reference(self)
    }

    fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
        let other = other.downcast_ref::<Self>()?;
        if self.ptr_eq(other) {
            return Some(true);
        }
        self.borrow().value_eq(&*other.borrow())
    }

    fn value_hash(&self) -> Option<u64> {
        self.borrow().value_hash()
    }
}

impl<T: Inspect> Reference for Shared<T> {
    #[inline]
    fn address(&self) -> usize {
        Shared::address(self)
    }

    fn borrow_value(&self) -> Ref<'_, dyn Inspect> {
        Ref::map(self.0.borrow(), |value| value as &dyn Inspect)
    }

    fn borrow_value_mut(&self) -> RefMut<'_, dyn Inspect> {
        RefMut::map(self.0.borrow_mut(), |value| value as &mut dyn Inspect)
    }

    fn adopt(&self, value: Box<dyn Inspect>) -> Box<dyn Inspect> {
        match value.take::<T>() {
            Ok(value) => Box::new(Self::new(value)),
            Err(value) => panic!(
                "attempted to wrap a `{}` in a handle to `{}`",
                value.descriptor().type_name(),
                core::any::type_name::<T>(),
            ),
        }
    }

    fn share(&self) -> Box<dyn Inspect> {
        Box::new(self.clone())
    }
}
