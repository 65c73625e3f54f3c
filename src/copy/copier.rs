use alloc::boxed::Box;

use crate::copy::array::copy_array;
use crate::copy::classify::classify;
use crate::copy::synthesize::synthesize;
use crate::error::CopyError;
use crate::inspect::Inspect;
use crate::ops::{Map, Object, Reference, ValueMut, ValueRef};

/// Deep-copies a value, whatever its shape.
///
/// The strategy follows the runtime shape of the value:
///
/// - scalars copy by value, through their pass-through constructor;
/// - text clones its content;
/// - maps rebuild with deep-copied values and shallow-cloned keys;
/// - sequences rebuild the container with shallow element copies;
/// - arrays copy slot by slot, substituting a zero-slot array when the
///   leading slot is absent;
/// - handles copy the pointed-at value into a fresh handle, rewiring a
///   field that points back at the source handle to the copy's own handle;
/// - everything else synthesizes a placeholder through a registered
///   constructor and populates its copyable fields.
///
/// Fields flagged static or transient are never copied. A restricted field
/// is left at whatever the placeholder constructor produced, with a trace.
/// The first fatal problem aborts the whole copy; there is no partial
/// result.
pub fn deep_copy(source: &dyn Inspect) -> Result<Box<dyn Inspect>, CopyError> {
    match source.shape() {
        ValueRef::Array(array) => copy_array(array),
        ValueRef::Map(map) => copy_map(map),
        ValueRef::Sequence(sequence) => Ok(sequence.clone_shallow()),
        ValueRef::Text(text) => Ok(text.clone_text()),
        ValueRef::Reference(handle) => copy_reference(handle),
        ValueRef::Scalar(_) | ValueRef::Object(_) => copy_constructed(source),
    }
}

/// Deep-copies a possibly-absent value. Absence propagates.
pub fn deep_copy_opt(
    source: Option<&dyn Inspect>,
) -> Result<Option<Box<dyn Inspect>>, CopyError> {
    source.map(deep_copy).transpose()
}

/// The constructor path: synthesize a placeholder, then, for objects,
/// overwrite its copyable fields from the source.
fn copy_constructed(source: &dyn Inspect) -> Result<Box<dyn Inspect>, CopyError> {
    let mut target = synthesize(source)?;
    if let ValueRef::Object(object) = source.shape() {
        let ValueMut::Object(target_object) = target.shape_mut() else {
            panic!(
                "constructor for `{}` produced a value of another shape",
                source.descriptor().type_name()
            );
        };
        populate_fields(object, target_object, None)?;
    }
    Ok(target)
}

/// Overwrites `target`'s copyable fields with copies of `source`'s.
///
/// `cycle` carries the source handle's address and the copy's own handle
/// when the copy runs inside one; a field pointing back at the source is
/// rewired to the copy instead of recursed into.
fn populate_fields(
    source: &dyn Object,
    target: &mut dyn Object,
    cycle: Option<(usize, &dyn Reference)>,
) -> Result<(), CopyError> {
    let Some(info) = source.descriptor().as_object() else {
        return Ok(());
    };
    let type_name = source.descriptor().type_name();

    for (index, field) in info.fields().iter().enumerate() {
        if field.is_excluded() {
            continue;
        }
        if field.is_restricted() {
            log::trace!(
                "field `{type_name}::{}` is restricted, keeping the constructor value",
                field.name()
            );
            continue;
        }

        let value = source.field_at(index);
        log::trace!(
            "field `{type_name}::{}` classifies as {}",
            field.name(),
            classify(value, cycle.map(|(address, _)| address)),
        );
        let Some(value) = value else {
            continue;
        };

        let copied = copy_value(value, cycle)?;
        target
            .set_field(index, copied)
            .map_err(|failure| CopyError::FieldAccess {
                type_name,
                field: field.name(),
                source: failure,
            })?;
    }
    Ok(())
}

/// Copies one field value, honoring the self-reference rewire.
fn copy_value(
    value: &dyn Inspect,
    cycle: Option<(usize, &dyn Reference)>,
) -> Result<Box<dyn Inspect>, CopyError> {
    match value.shape() {
        ValueRef::Reference(handle) => {
            if let Some((address, target_handle)) = cycle {
                if handle.address() == address {
                    return Ok(target_handle.share());
                }
            }
            copy_reference(handle)
        }
        ValueRef::Scalar(scalar) => Ok(scalar.into_inspect()),
        ValueRef::Text(text) => Ok(text.clone_text()),
        ValueRef::Map(map) => copy_map(map),
        ValueRef::Sequence(sequence) => Ok(sequence.clone_shallow()),
        ValueRef::Array(array) => copy_array(array),
        ValueRef::Object(_) => copy_constructed(value),
    }
}

/// Keys keep their identity; only the value side goes through the pipeline.
fn copy_map(map: &dyn Map) -> Result<Box<dyn Inspect>, CopyError> {
    map.rebuild_with(&mut deep_copy)
}

/// Copies the value behind a handle into a fresh handle.
///
/// For object values the placeholder is adopted into the new handle before
/// fields are populated, so a self-referential field can be rewired to the
/// copy while the copy is still being filled in.
fn copy_reference(handle: &dyn Reference) -> Result<Box<dyn Inspect>, CopyError> {
    let inner = handle.borrow_value();
    if let ValueRef::Object(source_object) = inner.shape() {
        let placeholder = synthesize(&*inner)?;
        let copied = handle.adopt(placeholder);
        {
            let ValueRef::Reference(new_handle) = copied.shape() else {
                panic!(
                    "handle `{}` adopted a value into another shape",
                    handle.descriptor().type_name()
                );
            };
            let mut target_inner = new_handle.borrow_value_mut();
            let ValueMut::Object(target_object) = target_inner.shape_mut() else {
                panic!(
                    "constructor for `{}` produced a value of another shape",
                    inner.descriptor().type_name()
                );
            };
            populate_fields(
                source_object,
                target_object,
                Some((handle.address(), new_handle)),
            )?;
        }
        Ok(copied)
    } else {
        let copied_inner = deep_copy(&*inner)?;
        Ok(handle.adopt(copied_inner))
    }
}
