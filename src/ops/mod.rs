//! The shape protocol: per-kind operation traits and the [`ValueRef`] /
//! [`ValueMut`] views that dispatch over them.

mod array;
mod map;
mod object;
mod reference;
mod sequence;
mod text;

pub use array::{Array, DynArray};
pub use map::Map;
pub use object::{Object, take_field};
pub use reference::{Reference, Shared};
pub use sequence::Sequence;
pub use text::Text;

use crate::info::{ScalarValue, ValueKind};
use crate::inspect::Inspect;

// -----------------------------------------------------------------------------
// ValueRef

/// An immutable view of a value's runtime shape.
///
/// Returned by [`Inspect::shape`]; the copier matches on this to pick the
/// copy strategy, so classification follows the runtime value rather than
/// any declared field type.
pub enum ValueRef<'a> {
    Scalar(ScalarValue),
    Text(&'a dyn Text),
    Object(&'a dyn Object),
    Map(&'a dyn Map),
    Sequence(&'a dyn Sequence),
    Array(&'a dyn Array),
    Reference(&'a dyn Reference),
}

impl ValueRef<'_> {
    /// Returns the kind of the viewed shape.
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
}

// -----------------------------------------------------------------------------
// ValueMut

/// A mutable view of a value's runtime shape.
///
/// Scalars are viewed through the plain [`Inspect`] value; they are replaced
/// wholesale rather than mutated in place.
pub enum ValueMut<'a> {
    Scalar(&'a mut dyn Inspect),
    Text(&'a mut dyn Text),
    Object(&'a mut dyn Object),
    Map(&'a mut dyn Map),
    Sequence(&'a mut dyn Sequence),
    Array(&'a mut dyn Array),
    Reference(&'a mut dyn Reference),
}

impl ValueMut<'_> {
    /// Returns the kind of the viewed shape.
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
}
