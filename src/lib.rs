#![doc = include_str!("../README.md")]

extern crate alloc;

pub mod copy;
pub mod error;
pub mod hash;
mod impls;
pub mod info;
mod inspect;
pub mod ops;

pub use copy::{ValueClass, classify, copy_array, deep_copy, deep_copy_opt, synthesize};
pub use error::{ConstructionFailure, CopyError, FieldWriteError};
pub use info::{Typed, scalar_kinds};
pub use inspect::Inspect;
