//! The copy engine: classification, placeholder synthesis and the graph
//! copier itself.

mod array;
mod classify;
mod copier;
mod synthesize;

pub use array::copy_array;
pub use classify::{ValueClass, classify};
pub use copier::{deep_copy, deep_copy_opt};
pub use synthesize::synthesize;
