use crate::info::TypeDescriptor;

/// A type with a statically-known [`TypeDescriptor`].
///
/// Implementations build the descriptor once inside a
/// [`DescriptorCell`](crate::info::DescriptorCell) (or a
/// [`GenericDescriptorCell`](crate::info::GenericDescriptorCell) for generic
/// types) and return the same `&'static` reference on every call.
pub trait Typed: 'static {
    /// Returns the descriptor of this type.
    fn type_descriptor() -> &'static TypeDescriptor;
}
