//! Collection rules: grow-only set union, list append, and map merge.
//!
//! Results are built from clones of both inputs; a rule never moves a
//! collection it was handed into its output. The set rule is grow-only:
//! there are no tombstones, so removal does not survive a merge.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::clock::VectorClock;
use crate::rules::MergeRule;

/// `local ∪ remote`.
///
/// Grow-only: commutative, associative, and idempotent, so replicas
/// converge under arbitrary merge order.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use concord_crdt::rules::{MergeRule, SetUnion};
/// use concord_crdt::VectorClock;
///
/// let local: HashSet<_> = ["alpha"].map(String::from).into();
/// let remote: HashSet<_> = ["beta"].map(String::from).into();
///
/// let clock = VectorClock::new();
/// let merged = SetUnion.merge(&local, &remote, &clock, &clock);
/// assert_eq!(merged.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SetUnion;

impl<E: Eq + Hash + Clone> MergeRule<HashSet<E>> for SetUnion {
    fn merge(
        &self,
        local: &HashSet<E>,
        remote: &HashSet<E>,
        _lc: &VectorClock,
        _rc: &VectorClock,
    ) -> HashSet<E> {
        local.union(remote).cloned().collect()
    }
}

/// Concatenate `local ‖ remote`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListAppend;

impl<E: Clone> MergeRule<Vec<E>> for ListAppend {
    fn merge(&self, local: &Vec<E>, remote: &Vec<E>, _lc: &VectorClock, _rc: &VectorClock) -> Vec<E> {
        let mut out = Vec::with_capacity(local.len() + remote.len());
        out.extend_from_slice(local);
        out.extend_from_slice(remote);
        out
    }
}

/// Local items followed by remote items not already present, order kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueAppend;

impl<E: Clone + PartialEq> MergeRule<Vec<E>> for UniqueAppend {
    fn merge(&self, local: &Vec<E>, remote: &Vec<E>, _lc: &VectorClock, _rc: &VectorClock) -> Vec<E> {
        let mut out = local.clone();
        for item in remote {
            if !out.contains(item) {
                out.push(item.clone());
            }
        }
        out
    }
}

/// Per-key map merge with an inner rule for colliding values.
///
/// Starts from the local map; remote keys absent locally are inserted, and
/// keys present on both sides are resolved by the inner rule with the same
/// replica clocks.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use concord_crdt::rules::{IntMax, MapMerge, MergeRule};
/// use concord_crdt::VectorClock;
///
/// let local = HashMap::from([("hits".to_string(), 3_i64)]);
/// let remote = HashMap::from([("hits".to_string(), 5), ("miss".to_string(), 1)]);
///
/// let clock = VectorClock::new();
/// let merged = MapMerge::new(IntMax).merge(&local, &remote, &clock, &clock);
/// assert_eq!(merged["hits"], 5);
/// assert_eq!(merged["miss"], 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MapMerge<R> {
    inner: R,
}

impl<R> MapMerge<R> {
    /// Create a map merge delegating value collisions to `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<K, V, R> MergeRule<HashMap<K, V>> for MapMerge<R>
where
    K: Eq + Hash + Clone,
    V: Clone,
    R: MergeRule<V>,
{
    fn merge(
        &self,
        local: &HashMap<K, V>,
        remote: &HashMap<K, V>,
        lc: &VectorClock,
        rc: &VectorClock,
    ) -> HashMap<K, V> {
        let mut out = local.clone();
        for (key, theirs) in remote {
            match out.get(key) {
                Some(ours) => {
                    let resolved = self.inner.merge(ours, theirs, lc, rc);
                    out.insert(key.clone(), resolved);
                }
                None => {
                    out.insert(key.clone(), theirs.clone());
                }
            }
        }
        out
    }
}
