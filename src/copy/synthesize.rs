use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::CopyError;
use crate::info::{Constructor, ParamKind, Seed};
use crate::inspect::Inspect;
use crate::ops::ValueRef;

/// The literal seeded into text-kinded constructor parameters.
pub(crate) const PLACEHOLDER_TEXT: &str = "0";

/// Builds a placeholder instance of the source's type.
///
/// Picks the registered constructor with the fewest parameters and invokes
/// it with one synthesized [`Seed`] per parameter. The placeholder only has
/// to exist; field population overwrites everything copyable afterwards.
///
/// A type with no registered constructor fails with
/// [`CopyError::NoViableConstructor`]; a constructor rejecting its seeds
/// fails with [`CopyError::Construction`]. Either aborts the whole copy.
pub fn synthesize(source: &dyn Inspect) -> Result<Box<dyn Inspect>, CopyError> {
    let descriptor = source.descriptor();
    let Some(constructor) = select_constructor(descriptor.constructors()) else {
        return Err(CopyError::NoViableConstructor {
            type_name: descriptor.type_name(),
        });
    };

    let seeds: Vec<Seed> = constructor
        .params()
        .iter()
        .map(|&param| seed_for(param, source))
        .collect();

    constructor
        .invoke(&seeds)
        .map_err(|failure| CopyError::Construction {
            type_name: descriptor.type_name(),
            source: failure,
        })
}

/// Fewest parameters wins; among one-parameter candidates, a scalar
/// parameter beats any other kind. Ties keep registration order.
fn select_constructor(constructors: &[Constructor]) -> Option<&Constructor> {
    constructors
        .iter()
        .min_by_key(|constructor| (constructor.params().len(), single_param_rank(constructor)))
}

fn single_param_rank(constructor: &Constructor) -> usize {
    match constructor.params() {
        [ParamKind::Scalar(_)] => 0,
        [_] => 1,
        _ => 0,
    }
}

/// Synthesizes the argument for one parameter.
///
/// A scalar parameter receives the source value itself when the source is a
/// scalar of the same kind, so copying a bare scalar is a pass-through.
fn seed_for(param: ParamKind, source: &dyn Inspect) -> Seed {
    match param {
        ParamKind::Scalar(kind) => {
            if let ValueRef::Scalar(value) = source.shape() {
                if value.kind() == kind {
                    return Seed::Scalar(value);
                }
            }
            Seed::Scalar(kind.zero())
        }
        ParamKind::Text => Seed::Text(PLACEHOLDER_TEXT),
        ParamKind::Array => Seed::EmptyArray,
        ParamKind::Reference => Seed::Null,
    }
}
