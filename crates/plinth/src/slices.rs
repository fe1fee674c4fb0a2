//! Generic helpers over ordered sequences.
//!
//! These are small conveniences shared by call sites that accumulate or
//! reshape sequences, pure and total over any element type.

use std::collections::HashMap;
use std::hash::Hash;

/// Flatten a sequence of sequences into a single one, preserving order.
pub fn flatten<T>(sequences: impl IntoIterator<Item = Vec<T>>) -> Vec<T> {
    sequences.into_iter().flatten().collect()
}

/// Build a map from the given items and key function.
///
/// On key collisions the later item wins.
pub fn to_map<K, V, F>(input: impl IntoIterator<Item = V>, key: F) -> HashMap<K, V>
where
    K: Eq + Hash,
    F: Fn(&V) -> K,
{
    input.into_iter().map(|item| (key(&item), item)).collect()
}

/// Keep only the items matching the predicate, preserving order.
pub fn filter<T, P>(input: impl IntoIterator<Item = T>, predicate: P) -> Vec<T>
where
    P: FnMut(&T) -> bool,
{
    input.into_iter().filter(predicate).collect()
}
