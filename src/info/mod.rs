//! Type metadata: descriptors, fields, constructors and the cells that hold
//! them.

mod cell;
mod constructor;
mod descriptor;
mod field;
mod scalar;
mod typed;

pub use cell::{DescriptorCell, GenericDescriptorCell};
pub use constructor::{BuildFn, Constructor, ParamKind, Seed};
pub use descriptor::{
    ArrayDescriptor, MapDescriptor, ObjectDescriptor, ReferenceDescriptor, ScalarDescriptor,
    SequenceDescriptor, TextDescriptor, Type, TypeDescriptor, ValueKind,
};
pub use field::{FieldDescriptor, FieldFlags};
pub use scalar::{ScalarKind, ScalarValue, scalar_kinds};
pub use typed::Typed;
