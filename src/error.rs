use alloc::borrow::Cow;
use core::any::type_name;

use thiserror::Error;

use crate::inspect::Inspect;

// -----------------------------------------------------------------------------
// CopyError

/// An enumeration of all fatal outcomes of a [`deep_copy`](crate::deep_copy) run.
///
/// The engine performs no local recovery: any of these aborts the whole copy
/// and surfaces to the caller with the deepest failure context attached.
/// There is no partial result.
///
/// Degradations that are *not* errors (and are logged instead): restricted
/// fields left at their constructor defaults, shallow element copies of
/// sequence values, and the degenerate empty substitute for arrays whose
/// leading element is absent.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The type registers no constructor at all, so no placeholder instance
    /// can be synthesized for it.
    #[error("type `{type_name}` has no viable public constructor")]
    NoViableConstructor { type_name: &'static str },

    /// A constructor was selected but rejected its synthesized arguments,
    /// e.g. a validating constructor refusing a placeholder zero.
    #[error("failed to construct a placeholder instance of `{type_name}`")]
    Construction {
        type_name: &'static str,
        #[source]
        source: ConstructionFailure,
    },

    /// Writing a field failed even though the field is not restricted.
    ///
    /// Restricted fields are pre-filtered before any read is attempted and
    /// never produce this error.
    #[error("failed to write field `{type_name}::{field}`")]
    FieldAccess {
        type_name: &'static str,
        field: &'static str,
        #[source]
        source: FieldWriteError,
    },
}

// -----------------------------------------------------------------------------
// ConstructionFailure

/// The failure a [`Constructor`](crate::info::Constructor) build function
/// reports when it cannot produce an instance from its seeds.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConstructionFailure {
    message: Cow<'static, str>,
}

impl ConstructionFailure {
    /// Creates a failure with the given message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldWriteError

/// Returned by [`Object::set_field`](crate::ops::Object::set_field) when the
/// received value cannot be stored into the field.
#[derive(Debug, Error)]
#[error("expected a value of type `{expected}`, received `{received}`")]
pub struct FieldWriteError {
    expected: &'static str,
    received: &'static str,
}

impl FieldWriteError {
    /// Creates an error from the expected and received type names.
    pub fn new(expected: &'static str, received: &'static str) -> Self {
        Self { expected, received }
    }

    /// Creates an error for a value that failed to downcast to `T`.
    pub fn mismatch<T: 'static>(received: &dyn Inspect) -> Self {
        Self::new(type_name::<T>(), received.descriptor().type_name())
    }
}
