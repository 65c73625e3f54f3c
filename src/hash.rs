//! Hash containers and the fixed-seed hasher used for value hashing.

use core::hash::BuildHasher;

pub use hashbrown::DefaultHashBuilder;

/// A [`hashbrown::HashMap`] with the crate-wide default hasher.
pub type HashMap<K, V, S = DefaultHashBuilder> = hashbrown::HashMap<K, V, S>;

/// Returns a hasher with a fixed seed.
///
/// [`Inspect::value_hash`](crate::Inspect::value_hash) implementations use
/// this so that equal values hash equally across program runs.
pub fn value_hasher() -> impl core::hash::Hasher {
    foldhash::fast::FixedState::default().build_hasher()
}
