use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use crate::hash::value_hasher;
use crate::info::{ArrayDescriptor, GenericDescriptorCell, TypeDescriptor, Typed};
use crate::inspect::Inspect;
use crate::ops::{Array, ValueMut, ValueRef};

impl<T: Inspect, const N: usize> Typed for [T; N] {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| TypeDescriptor::Array(ArrayDescriptor::new::<Self>()))
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    #[inline]
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    #[inline]
    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Array(self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Array(self)
    }

    fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
        let other = other.downcast_ref::<Self>()?;
        for (left, right) in core::iter::zip(self, other) {
            if !left.value_eq(right)? {
                return Some(false);
            }
        }
        Some(true)
    }

    fn value_hash(&self) -> Option<u64> {
        let mut hasher = value_hasher();
        N.hash(&mut hasher);
        for element in self {
            element.value_hash()?.hash(&mut hasher);
        }
        Some(hasher.finish())
    }
}

/// Fixed arrays have no absent slots; every slot is always present, and
/// [`rebuild`](Array::rebuild) expects all `N` items back.
impl<T: Inspect, const N: usize> Array for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Inspect> {
        self.as_slice().get(index).map(|element| element as &dyn Inspect)
    }

    fn new_empty(&self) -> Box<dyn Inspect> {
        let empty: [T; 0] = [];
        Box::new(empty)
    }

    fn rebuild(&self, items: Vec<Option<Box<dyn Inspect>>>) -> Box<dyn Inspect> {
        let received = items.len();
        let elements: Vec<T> = items
            .into_iter()
            .map(|slot| {
                let slot = slot.unwrap_or_else(|| {
                    panic!(
                        "rebuild of `{}` received an absent slot",
                        self.descriptor().type_name()
                    )
                });
                match slot.take::<T>() {
                    Ok(element) => element,
                    Err(slot) => panic!(
                        "rebuild of `{}` received a `{}` slot",
                        self.descriptor().type_name(),
                        slot.descriptor().type_name(),
                    ),
                }
            })
            .collect();
        match <[T; N]>::try_from(elements) {
            Ok(rebuilt) => Box::new(rebuilt),
            Err(_) => panic!(
                "rebuild of `{}` received {received} of {N} slots",
                self.descriptor().type_name(),
            ),
        }
    }
}
