use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::Any;
use core::hash::{BuildHasher, Hash, Hasher};

use crate::error::CopyError;
use crate::hash::value_hasher;
use crate::info::{GenericDescriptorCell, MapDescriptor, TypeDescriptor, Typed};
use crate::inspect::Inspect;
use crate::ops::{Map, ValueMut, ValueRef};

fn entry_hash(key: &dyn Inspect, value: &dyn Inspect) -> Option<u64> {
    let mut hasher = value_hasher();
    key.value_hash()?.hash(&mut hasher);
    value.value_hash()?.hash(&mut hasher);
    Some(hasher.finish())
}

/// Implements the map protocol for a keyed container.
///
/// `rebuild_with` keeps the key side shallow (a plain key clone) and routes
/// only the value side through the supplied copier. A copied value that does
/// not hold the map's value type is a copier bug and panics.
///
/// Hashes are combined order-independently, so two maps holding equal
/// entries hash equally regardless of iteration order.
macro_rules! impl_map_inspect {
    (
        $ty:ty,
        <$($param:ident $(: $bound0:ident $(+ $bound:ident)*)?),*>,
        key: $key:ident,
        value: $value:ident,
        new: $new:expr
    ) => {
        impl<$($param $(: $bound0 $(+ $bound)*)?),*> Typed for $ty
        where
            $key: Inspect,
            $value: Inspect,
        {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| TypeDescriptor::Map(MapDescriptor::new::<Self>()))
            }
        }

        impl<$($param $(: $bound0 $(+ $bound)*)?),*> Inspect for $ty
        where
            $key: Inspect,
            $value: Inspect,
        {
            #[inline]
            fn descriptor(&self) -> &'static TypeDescriptor {
                Self::type_descriptor()
            }

            #[inline]
            fn shape(&self) -> ValueRef<'_> {
                ValueRef::Map(self)
            }

            #[inline]
            fn shape_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Map(self)
            }

            fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
                let other = other.downcast_ref::<Self>()?;
                if Self::len(self) != Self::len(other) {
                    return Some(false);
                }
                for (key, value) in self {
                    match other.get(key) {
                        Some(counterpart) => {
                            if !value.value_eq(counterpart)? {
                                return Some(false);
                            }
                        }
                        None => return Some(false),
                    }
                }
                Some(true)
            }

            fn value_hash(&self) -> Option<u64> {
                let mut combined = (Self::len(self) as u64).wrapping_mul(0x9e37_79b9);
                for (key, value) in self {
                    combined = combined.wrapping_add(entry_hash(key, value)?);
                }
                Some(combined)
            }
        }

        impl<$($param $(: $bound0 $(+ $bound)*)?),*> Map for $ty
        where
            $key: Inspect,
            $value: Inspect,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Inspect, &dyn Inspect)> + '_> {
                Box::new(
                    <&Self as IntoIterator>::into_iter(self)
                        .map(|(key, value)| (key as &dyn Inspect, value as &dyn Inspect)),
                )
            }

            fn get(&self, key: &dyn Inspect) -> Option<&dyn Inspect> {
                let key = key.downcast_ref::<$key>()?;
                Self::get(self, key).map(|value| value as &dyn Inspect)
            }

            fn rebuild_with(
                &self,
                copy_value: &mut dyn FnMut(&dyn Inspect) -> Result<Box<dyn Inspect>, CopyError>,
            ) -> Result<Box<dyn Inspect>, CopyError> {
                let mut rebuilt: Self = $new(self);
                for (key, value) in self {
                    let copied = copy_value(value)?;
                    let copied = match copied.take::<$value>() {
                        Ok(copied) => copied,
                        Err(copied) => panic!(
                            "value copy for map `{}` produced a `{}`",
                            self.descriptor().type_name(),
                            copied.descriptor().type_name(),
                        ),
                    };
                    rebuilt.insert(key.clone(), copied);
                }
                Ok(Box::new(rebuilt))
            }
        }
    };
}

impl_map_inspect!(
    crate::hash::HashMap<K, V, S>,
    <K: Clone + Eq + Hash, V, S: BuildHasher + Default + Any>,
    key: K,
    value: V,
    new: |source: &Self| Self::with_capacity_and_hasher(Self::len(source), S::default())
);

impl_map_inspect!(
    BTreeMap<K, V>,
    <K: Clone + Ord, V>,
    key: K,
    value: V,
    new: |_source: &Self| Self::new()
);
