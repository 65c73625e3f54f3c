use alloc::boxed::Box;

use crate::inspect::Inspect;

/// An operations trait of text-shaped values.
///
/// Text is immutable as far as the copier is concerned: copying a text
/// value is a plain content clone with no constructor involvement.
pub trait Text: Inspect {
    /// Returns the text content.
    fn as_str(&self) -> &str;

    /// Returns a value-identical copy.
    fn clone_text(&self) -> Box<dyn Inspect>;
}
