use alloc::boxed::Box;

use crate::error::ConstructionFailure;
use crate::info::{
    Constructor, DescriptorCell, ParamKind, ScalarDescriptor, ScalarKind, ScalarValue, Seed,
    TypeDescriptor, Typed,
};
use crate::inspect::Inspect;
use crate::ops::{ValueMut, ValueRef};

/// Implements the scalar protocol for a primitive type.
///
/// Each scalar registers a single one-parameter constructor taking its own
/// kind. The synthesizer seeds that parameter with the source value when the
/// source is a matching scalar, and with the kind's zero otherwise, so
/// copying a bare scalar passes the value through unchanged.
macro_rules! impl_scalar_inspect {
    ($ty:ty, $kind:ident, $as_fn:ident) => {
        impl Typed for $ty {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: DescriptorCell = DescriptorCell::new();
                CELL.get_or_init(|| {
                    TypeDescriptor::Scalar(ScalarDescriptor::new::<$ty>(
                        ScalarKind::$kind,
                        Constructor::new(&[ParamKind::Scalar(ScalarKind::$kind)], |seeds| {
                            let value = seeds
                                .first()
                                .and_then(Seed::scalar)
                                .and_then(ScalarValue::$as_fn)
                                .ok_or_else(|| {
                                    ConstructionFailure::new(concat!(
                                        "expected a ",
                                        stringify!($kind),
                                        " seed"
                                    ))
                                })?;
                            Ok(Box::new(value))
                        }),
                    ))
                })
            }
        }

        impl Inspect for $ty {
            #[inline]
            fn descriptor(&self) -> &'static TypeDescriptor {
                Self::type_descriptor()
            }

            #[inline]
            fn shape(&self) -> ValueRef<'_> {
                ValueRef::Scalar(ScalarValue::$kind(*self))
            }

            #[inline]
            fn shape_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Scalar(self)
            }

            fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
                other.downcast_ref::<Self>().map(|other| self == other)
            }

            fn value_hash(&self) -> Option<u64> {
                Some(ScalarValue::$kind(*self).stable_hash())
            }
        }
    };
}

impl_scalar_inspect!(bool, Bool, as_bool);
impl_scalar_inspect!(i8, Byte, as_byte);
impl_scalar_inspect!(char, Char, as_char);
impl_scalar_inspect!(i16, Short, as_short);
impl_scalar_inspect!(i32, Int, as_int);
impl_scalar_inspect!(i64, Long, as_long);
impl_scalar_inspect!(f32, Float, as_float);
impl_scalar_inspect!(f64, Double, as_double);

// The unit scalar carries no payload, so its constructor ignores its seed.
impl Typed for () {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::Scalar(ScalarDescriptor::new::<()>(
                ScalarKind::Void,
                Constructor::new(&[ParamKind::Scalar(ScalarKind::Void)], |_seeds| {
                    Ok(Box::new(()))
                }),
            ))
        })
    }
}

impl Inspect for () {
    #[inline]
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    #[inline]
    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Scalar(ScalarValue::Void(()))
    }

    #[inline]
    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Scalar(self)
    }

    fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
        Some(other.is::<Self>())
    }

    fn value_hash(&self) -> Option<u64> {
        Some(ScalarValue::Void(()).stable_hash())
    }
}
