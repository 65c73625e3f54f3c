use core::fmt;

use crate::inspect::Inspect;
use crate::ops::ValueRef;

// -----------------------------------------------------------------------------
// ValueClass

/// The copy strategy a field value is routed to.
///
/// Classification is structural and happens per value, at copy time: a
/// field declared as a general value is classed by what it actually holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueClass {
    /// The field holds nothing; absence propagates.
    Null,
    /// Copied by value.
    Scalar,
    /// Content clone.
    Text,
    /// Positional slot-by-slot copy.
    Array,
    /// Values deep, keys shallow.
    MapLike,
    /// Fresh container, shallow elements.
    SequenceLike,
    /// A handle pointing back at the value being copied; rewired to the
    /// copy's own handle instead of recursing.
    SelfReference,
    /// Everything else: synthesize a placeholder, then populate fields.
    PlainObject,
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Scalar => "scalar",
            Self::Text => "text",
            Self::Array => "array",
            Self::MapLike => "map-like",
            Self::SequenceLike => "sequence-like",
            Self::SelfReference => "self-reference",
            Self::PlainObject => "plain object",
        };
        f.write_str(name)
    }
}

/// Classifies a field value against the handle currently being copied.
///
/// `copying` is the address of the source handle when the copy runs inside
/// one; a handle field equal to it is the self-reference case.
pub fn classify(value: Option<&dyn Inspect>, copying: Option<usize>) -> ValueClass {
    let Some(value) = value else {
        return ValueClass::Null;
    };
    match value.shape() {
        ValueRef::Scalar(_) => ValueClass::Scalar,
        ValueRef::Text(_) => ValueClass::Text,
        ValueRef::Array(_) => ValueClass::Array,
        ValueRef::Map(_) => ValueClass::MapLike,
        ValueRef::Sequence(_) => ValueClass::SequenceLike,
        ValueRef::Object(_) => ValueClass::PlainObject,
        ValueRef::Reference(handle) => {
            if copying == Some(handle.address()) {
                ValueClass::SelfReference
            } else {
                ValueClass::PlainObject
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashMap;
    use crate::ops::{DynArray, Reference, Shared};
    use alloc::string::String;
    use alloc::vec::Vec;

    fn class_of(value: &dyn Inspect, copying: Option<usize>) -> ValueClass {
        classify(Some(value), copying)
    }

    #[test]
    fn classes_follow_runtime_shape() {
        assert_eq!(classify(None, None), ValueClass::Null);
        assert_eq!(class_of(&5i32, None), ValueClass::Scalar);
        assert_eq!(class_of(&String::from("x"), None), ValueClass::Text);
        assert_eq!(class_of(&DynArray::new(), None), ValueClass::Array);
        assert_eq!(
            class_of(&HashMap::<String, i32>::default(), None),
            ValueClass::MapLike
        );
        assert_eq!(class_of(&Vec::<i32>::new(), None), ValueClass::SequenceLike);
    }

    #[test]
    fn self_reference_needs_a_matching_address() {
        let handle = Shared::new(1i32);
        let address = Reference::address(&handle);
        assert_eq!(
            class_of(&handle, Some(address)),
            ValueClass::SelfReference
        );
        assert_eq!(
            class_of(&handle, Some(address + 1)),
            ValueClass::PlainObject
        );
        assert_eq!(class_of(&handle, None), ValueClass::PlainObject);
    }
}
