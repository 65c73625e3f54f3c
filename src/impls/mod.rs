//! Protocol implementations for primitives and standard containers.

mod array;
mod map;
mod scalars;
mod sequence;
mod text;
