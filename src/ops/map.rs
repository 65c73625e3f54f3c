use alloc::boxed::Box;

use crate::error::CopyError;
use crate::inspect::Inspect;

/// An operations trait of map-shaped values.
///
/// Maps copy asymmetrically: values go through the full deep-copy pipeline
/// while keys are cloned shallowly, preserving whatever identity the key
/// type's clone preserves.
pub trait Map: Inspect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries, in the map's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Inspect, &dyn Inspect)> + '_>;

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &dyn Inspect) -> Option<&dyn Inspect>;

    /// Builds a new map of the same concrete type, cloning each key and
    /// passing each value through `copy_value`.
    ///
    /// The first value failure aborts and surfaces as-is.
    fn rebuild_with(
        &self,
        copy_value: &mut dyn FnMut(&dyn Inspect) -> Result<Box<dyn Inspect>, CopyError>,
    ) -> Result<Box<dyn Inspect>, CopyError>;
}
