use alloc::boxed::Box;
use alloc::string::String;
use core::hash::{Hash, Hasher};

use crate::hash::value_hasher;
use crate::info::{DescriptorCell, TextDescriptor, TypeDescriptor, Typed};
use crate::inspect::Inspect;
use crate::ops::{Text, ValueMut, ValueRef};

fn text_hash(text: &str) -> u64 {
    let mut hasher = value_hasher();
    text.hash(&mut hasher);
    hasher.finish()
}

impl Typed for String {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| TypeDescriptor::Text(TextDescriptor::new::<Self>()))
    }
}

impl Inspect for String {
    #[inline]
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    #[inline]
    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Text(self)
    }

    fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
        match other.shape() {
            ValueRef::Text(other) => Some(self == other.as_str()),
            _ => None,
        }
    }

    fn value_hash(&self) -> Option<u64> {
        Some(text_hash(self))
    }
}

impl Text for String {
    #[inline]
    fn as_str(&self) -> &str {
        self
    }

    fn clone_text(&self) -> Box<dyn Inspect> {
        Box::new(self.clone())
    }
}

impl Typed for &'static str {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| TypeDescriptor::Text(TextDescriptor::new::<Self>()))
    }
}

impl Inspect for &'static str {
    #[inline]
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    #[inline]
    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    #[inline]
    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Text(self)
    }

    fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
        match other.shape() {
            ValueRef::Text(other) => Some(*self == other.as_str()),
            _ => None,
        }
    }

    fn value_hash(&self) -> Option<u64> {
        Some(text_hash(self))
    }
}

impl Text for &'static str {
    #[inline]
    fn as_str(&self) -> &str {
        self
    }

    fn clone_text(&self) -> Box<dyn Inspect> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn text_equality_crosses_representations() {
        let owned = "hello".to_string();
        let borrowed: &'static str = "hello";
        assert_eq!(owned.value_eq(&borrowed), Some(true));
        assert_eq!(owned.value_hash(), borrowed.value_hash());
        assert_eq!(owned.value_eq(&5i32), None);
    }

    #[test]
    fn clone_text_is_value_identical() {
        let original = "content".to_string();
        let copied = original.clone_text();
        assert_eq!(copied.take::<String>().ok(), Some(original));
    }
}
