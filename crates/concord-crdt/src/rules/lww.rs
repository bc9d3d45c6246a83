//! Whole-value rules: last-write-wins and fixed/random preference.
//!
//! `LastWriteWins` is the engine's default rule. Unlike the rest of the
//! catalog it re-derives the causal relation internally, so binding it
//! explicitly to a field reproduces the engine's own dispatch: the causally
//! newer side wins, and both `Equal` and `Concurrent` resolve to remote.

use crate::clock::{Relation, VectorClock};
use crate::rules::MergeRule;

/// Vector-clock last-write-wins.
///
/// The causally newer side wins. On `Equal` and on `Concurrent` the remote
/// side wins. This tie-break is symmetric: both replicas of a pair converge
/// on the same value regardless of which side initiates the merge.
///
/// # Examples
///
/// ```
/// use concord_crdt::rules::{LastWriteWins, MergeRule};
/// use concord_crdt::VectorClock;
///
/// let rule = LastWriteWins;
///
/// let mut older = VectorClock::new();
/// older.increment("a");
/// let mut newer = older.clone();
/// newer.increment("a");
///
/// // Local is causally newer: local wins.
/// assert_eq!(rule.merge(&10, &20, &newer, &older), 10);
/// // Remote is causally newer: remote wins.
/// assert_eq!(rule.merge(&10, &20, &older, &newer), 20);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LastWriteWins;

impl<V: Clone> MergeRule<V> for LastWriteWins {
    fn merge(&self, local: &V, remote: &V, lc: &VectorClock, rc: &VectorClock) -> V {
        match lc.compare(rc) {
            Relation::After => local.clone(),
            Relation::Before | Relation::Equal | Relation::Concurrent => remote.clone(),
        }
    }
}

/// Always keep the local value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferLocal;

impl<V: Clone> MergeRule<V> for PreferLocal {
    fn merge(&self, local: &V, _remote: &V, _lc: &VectorClock, _rc: &VectorClock) -> V {
        local.clone()
    }
}

/// Always take the remote value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferRemote;

impl<V: Clone> MergeRule<V> for PreferRemote {
    fn merge(&self, _local: &V, remote: &V, _lc: &VectorClock, _rc: &VectorClock) -> V {
        remote.clone()
    }
}

/// Uniform coin flip between the two sides.
///
/// The one explicitly nondeterministic rule in the catalog. Replicas merged
/// with this rule do not converge; it exists for fields where either value
/// is acceptable and bias is undesirable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChoice;

impl<V: Clone> MergeRule<V> for RandomChoice {
    fn merge(&self, local: &V, remote: &V, _lc: &VectorClock, _rc: &VectorClock) -> V {
        if rand::random::<bool>() {
            local.clone()
        } else {
            remote.clone()
        }
    }
}
