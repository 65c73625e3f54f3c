use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use crate::hash::value_hasher;
use crate::info::{ArrayDescriptor, DescriptorCell, TypeDescriptor, Typed};
use crate::inspect::Inspect;
use crate::ops::{ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Array

/// An operations trait of array-shaped values: fixed-extent, positional
/// containers whose slots may be individually absent.
///
/// Arrays copy positionally, slot by slot, through the full deep-copy
/// pipeline. An array whose leading slot is absent is judged untypable and
/// replaced by the degenerate empty substitute from
/// [`new_empty`](Array::new_empty).
pub trait Array: Inspect {
    /// Returns the number of slots.
    fn len(&self) -> usize;

    /// Returns the value in the slot at `index`, or `None` if the slot is
    /// absent or out of range.
    fn get(&self, index: usize) -> Option<&dyn Inspect>;

    /// Returns the degenerate zero-slot substitute of this array type.
    fn new_empty(&self) -> Box<dyn Inspect>;

    /// Builds a new array of the same concrete type from copied slots.
    ///
    /// Receives exactly [`len`](Array::len) items, each `None` where the
    /// source slot was absent.
    ///
    /// # Panics
    ///
    /// May panic if an item does not hold the element type, which indicates
    /// a copier bug rather than caller misuse.
    fn rebuild(&self, items: Vec<Option<Box<dyn Inspect>>>) -> Box<dyn Inspect>;
}

// -----------------------------------------------------------------------------
// DynArray

/// A heterogeneous positional array with individually-absent slots.
///
/// The array analogue of a dynamic object container: slots hold any
/// [`Inspect`] value, or nothing at all.
#[derive(Default)]
pub struct DynArray {
    items: Vec<Option<Box<dyn Inspect>>>,
}

impl DynArray {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty array with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a present value.
    pub fn push<T: Inspect>(&mut self, value: T) {
        self.items.push(Some(Box::new(value)));
    }

    /// Appends an already-boxed slot, present or absent.
    pub fn push_boxed(&mut self, slot: Option<Box<dyn Inspect>>) {
        self.items.push(slot);
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the array holds no slots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Builds an array of present values.
    pub fn from_values<T: Inspect>(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: values
                .into_iter()
                .map(|value| Some(Box::new(value) as Box<dyn Inspect>))
                .collect(),
        }
    }
}

impl FromIterator<Option<Box<dyn Inspect>>> for DynArray {
    fn from_iter<I: IntoIterator<Item = Option<Box<dyn Inspect>>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Typed for DynArray {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| TypeDescriptor::Array(ArrayDescriptor::new::<Self>()))
    }
}

impl Inspect for DynArray {
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
        if self.items.len() != other.items.len() {
            return Some(false);
        }
        for (left, right) in self.items.iter().zip(&other.items) {
            match (left, right) {
                (None, None) => {}
                (Some(left), Some(right)) => {
                    if !left.value_eq(&**right)? {
                        return Some(false);
                    }
                }
                _ => return Some(false),
            }
        }
        Some(true)
    }

    fn value_hash(&self) -> Option<u64> {
        let mut hasher = value_hasher();
        self.items.len().hash(&mut hasher);
        for slot in &self.items {
            match slot {
                None => 0u64.hash(&mut hasher),
                Some(value) => value.value_hash()?.hash(&mut hasher),
            }
        }
        Some(hasher.finish())
    }
}

impl PartialEq for DynArray {
    fn eq(&self, other: &Self) -> bool {
        self.value_eq(other) == Some(true)
    }
}

impl core::fmt::Debug for DynArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.debug_fmt(f)
    }
}

impl Array for DynArray {
    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<&dyn Inspect> {
        self.items.get(index)?.as_deref()
    }

    fn new_empty(&self) -> Box<dyn Inspect> {
        Box::new(Self::new())
    }

    fn rebuild(&self, items: Vec<Option<Box<dyn Inspect>>>) -> Box<dyn Inspect> {
        Box::new(Self { items })
    }
}
