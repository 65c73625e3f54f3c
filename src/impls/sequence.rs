use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use crate::hash::value_hasher;
use crate::info::{GenericDescriptorCell, SequenceDescriptor, TypeDescriptor, Typed};
use crate::inspect::Inspect;
use crate::ops::{Sequence, ValueMut, ValueRef};

/// Implements the sequence protocol for an ordered `Clone` container.
///
/// `clone_shallow` is the container's own `Clone`: a fresh container whose
/// elements are as deep as `T::clone` goes, so handle elements still point
/// at the original values.
macro_rules! impl_sequence_inspect {
    ($ty:ident) => {
        impl<T: Inspect + Clone> Typed for $ty<T> {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeDescriptor::Sequence(SequenceDescriptor::new::<Self>())
                })
            }
        }

        impl<T: Inspect + Clone> Inspect for $ty<T> {
            #[inline]
            fn descriptor(&self) -> &'static TypeDescriptor {
                Self::type_descriptor()
            }

            #[inline]
            fn shape(&self) -> ValueRef<'_> {
                ValueRef::Sequence(self)
            }

            #[inline]
            fn shape_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Sequence(self)
            }

            fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
                let other = other.downcast_ref::<Self>()?;
                if Self::len(self) != Self::len(other) {
                    return Some(false);
                }
                for (left, right) in core::iter::zip(self, other) {
                    if !left.value_eq(right)? {
                        return Some(false);
                    }
                }
                Some(true)
            }

            fn value_hash(&self) -> Option<u64> {
                let mut hasher = value_hasher();
                Self::len(self).hash(&mut hasher);
                for element in self {
                    element.value_hash()?.hash(&mut hasher);
                }
                Some(hasher.finish())
            }
        }

        impl<T: Inspect + Clone> Sequence for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Inspect> + '_> {
                Box::new(
                    <&Self as IntoIterator>::into_iter(self)
                        .map(|element| element as &dyn Inspect),
                )
            }

            fn clone_shallow(&self) -> Box<dyn Inspect> {
                Box::new(self.clone())
            }
        }
    };
}

impl_sequence_inspect!(Vec);
impl_sequence_inspect!(VecDeque);
