use alloc::boxed::Box;
use core::fmt;

use crate::error::ConstructionFailure;
use crate::info::{ScalarKind, ScalarValue};
use crate::inspect::Inspect;
use crate::ops::DynArray;

// -----------------------------------------------------------------------------
// ParamKind

/// The declared kind of a constructor parameter.
///
/// Seeds are synthesized per kind: scalars get their zero (or the source
/// value when the source itself is a matching scalar), text gets a
/// placeholder literal, arrays get an empty array, and everything else is
/// seeded absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Scalar(ScalarKind),
    Text,
    Array,
    Reference,
}

// -----------------------------------------------------------------------------
// Constructor

/// The function a [`Constructor`] invokes to build an instance.
///
/// Receives exactly one [`Seed`] per declared parameter. Validating
/// constructors reject unacceptable seeds through [`ConstructionFailure`],
/// which aborts the whole copy.
pub type BuildFn = fn(&[Seed]) -> Result<Box<dyn Inspect>, ConstructionFailure>;

/// A registered way of building a placeholder instance of a type.
///
/// Types register any number of constructors in their descriptor; the
/// synthesizer picks the one with the fewest parameters, preferring scalar
/// parameters among single-parameter candidates.
#[derive(Clone, Copy)]
pub struct Constructor {
    params: &'static [ParamKind],
    build: BuildFn,
}

impl Constructor {
    /// Creates a constructor over the given parameter list.
    pub const fn new(params: &'static [ParamKind], build: BuildFn) -> Self {
        Self { params, build }
    }

    /// Returns the declared parameter kinds.
    #[inline]
    pub const fn params(&self) -> &'static [ParamKind] {
        self.params
    }

    /// Invokes the build function with the given seeds.
    ///
    /// The caller supplies one seed per parameter.
    #[inline]
    pub fn invoke(&self, seeds: &[Seed]) -> Result<Box<dyn Inspect>, ConstructionFailure> {
        debug_assert_eq!(seeds.len(), self.params.len());
        (self.build)(seeds)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Seed

/// A synthesized constructor argument.
#[derive(Clone, Copy, Debug)]
pub enum Seed {
    Scalar(ScalarValue),
    Text(&'static str),
    EmptyArray,
    Null,
}

impl Seed {
    /// Returns the scalar payload, if any.
    #[inline]
    pub const fn scalar(&self) -> Option<ScalarValue> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[inline]
    pub const fn text(&self) -> Option<&'static str> {
        match self {
            Self::Text(text) => Some(*text),
            _ => None,
        }
    }

    /// Returns a fresh empty array, if this seed is an array seed.
    #[inline]
    pub fn array(&self) -> Option<DynArray> {
        match self {
            Self::EmptyArray => Some(DynArray::new()),
            _ => None,
        }
    }

    /// Returns `true` if this seed carries no value.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}
