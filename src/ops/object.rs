use alloc::boxed::Box;

use crate::error::FieldWriteError;
use crate::inspect::Inspect;

/// An operations trait of object-shaped values: types with declared,
/// positionally-addressed fields.
///
/// Field indices follow the declaration order in the type's
/// [`ObjectDescriptor`](crate::info::ObjectDescriptor). An absent value
/// (`None` from [`field_at`](Object::field_at)) means the field currently
/// holds nothing; the copier propagates absence as-is.
///
/// Restricted fields may refuse [`set_field`](Object::set_field); the
/// copier never calls it for them, so a refusal reaching the caller is a
/// descriptor/impl mismatch.
pub trait Object: Inspect {
    /// Returns the value of the field at `index`, or `None` if the field is
    /// currently absent.
    ///
    /// Out-of-range indices also return `None`.
    fn field_at(&self, index: usize) -> Option<&dyn Inspect>;

    /// Stores `value` into the field at `index`.
    ///
    /// # Panics
    ///
    /// May panic if `index` is out of range, which indicates a mismatch
    /// between the descriptor and the impl.
    fn set_field(&mut self, index: usize, value: Box<dyn Inspect>)
    -> Result<(), FieldWriteError>;

    /// Returns the number of declared fields.
    fn field_len(&self) -> usize {
        self.descriptor()
            .as_object()
            .map(|info| info.field_len())
            .unwrap_or_default()
    }
}

/// Unboxes `value` into a `T` field slot.
///
/// The usual body of a [`set_field`](Object::set_field) arm: downcasts the
/// incoming value and reports a [`FieldWriteError`] naming both types when
/// it does not hold a `T`.
#[inline]
pub fn take_field<T: Inspect>(value: Box<dyn Inspect>) -> Result<T, FieldWriteError> {
    value.take::<T>().map_err(|value| FieldWriteError::mismatch::<T>(&*value))
}
