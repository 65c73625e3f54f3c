use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::copy::copier::deep_copy_opt;
use crate::error::CopyError;
use crate::inspect::Inspect;
use crate::ops::Array;

/// Copies an array slot by slot, preserving positions and absence.
///
/// An array with no slots, or whose leading slot is absent, cannot be typed
/// from its content; it degrades to the zero-slot substitute of its type,
/// with a warning, rather than failing the copy.
pub fn copy_array(array: &dyn Array) -> Result<Box<dyn Inspect>, CopyError> {
    if array.len() == 0 || array.get(0).is_none() {
        log::warn!(
            "array `{}` has no leading element, substituting an empty array",
            array.descriptor().type_name()
        );
        return Ok(array.new_empty());
    }

    let mut items = Vec::with_capacity(array.len());
    for index in 0..array.len() {
        items.push(deep_copy_opt(array.get(index))?);
    }
    Ok(array.rebuild(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::DynArray;

    #[test]
    fn slots_copy_positionally() {
        let mut source = DynArray::new();
        source.push(1i32);
        source.push_boxed(None);
        source.push(2i32);

        let copied = copy_array(&source).unwrap();
        let copied = copied.take::<DynArray>().ok().unwrap();
        assert_eq!(copied.len(), 3);
        assert!(copied.get(1).is_none());
        assert_eq!(source.value_eq(&copied), Some(true));
    }

    #[test]
    fn untypable_arrays_degrade_to_empty() {
        let empty = DynArray::new();
        let copied = copy_array(&empty).unwrap();
        assert!(copied.take::<DynArray>().ok().unwrap().is_empty());

        let mut leading_hole = DynArray::new();
        leading_hole.push_boxed(None);
        leading_hole.push(5i32);
        let copied = copy_array(&leading_hole).unwrap();
        assert!(copied.take::<DynArray>().ok().unwrap().is_empty());
    }
}
