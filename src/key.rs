use std::collections::{HashMap, HashSet};

pub(crate) type KeySet<K> = HashSet<K>;
pub(crate) type KeyIndexMap<K> = HashMap<K, usize>;

/// Bounds required of stable item keys.
///
/// Keys are hashed for selection lookups and cloned into slots, snapshots and notifications.
#[doc(hidden)]
pub trait ItemKeyBound: core::hash::Hash + Eq + Clone {}
impl<K: core::hash::Hash + Eq + Clone> ItemKeyBound for K {}
