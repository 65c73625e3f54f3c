use alloc::boxed::Box;

use crate::inspect::Inspect;

/// An operations trait of sequence-shaped values.
///
/// Sequences copy shallow: the container is fresh but the elements are
/// clones at whatever depth the element type's own `Clone` provides, so
/// handle elements keep pointing at the originals.
pub trait Sequence: Inspect {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the elements, in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Inspect> + '_>;

    /// Returns a fresh container holding shallow element copies.
    fn clone_shallow(&self) -> Box<dyn Inspect>;
}
