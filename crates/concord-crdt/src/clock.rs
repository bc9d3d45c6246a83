//! Vector clock for causal ordering (not total ordering).
//!
//! Each replica carries one clock: a map from node id to the number of local
//! updates observed at that node. Absent entries are semantically zero.
//! Comparing two clocks yields a [`Relation`], the four-valued causal order
//! the merge engine dispatches on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Causal order between two vector clocks. Derived by [`VectorClock::compare`],
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Every entry of `self` is ≤ the other's, at least one strictly less.
    Before,
    /// Every entry of `self` is ≥ the other's, at least one strictly greater.
    After,
    /// Entry-wise identical.
    Equal,
    /// Mutually unordered: each side has an entry the other lacks knowledge of.
    Concurrent,
}

/// A vector clock: node id → monotone update counter.
///
/// # Examples
///
/// ```
/// use concord_crdt::{Relation, VectorClock};
///
/// let mut a = VectorClock::new();
/// a.increment("alpha");
///
/// let mut b = a.clone();
/// b.increment("beta");
///
/// assert_eq!(a.compare(&b), Relation::Before);
/// assert_eq!(b.compare(&a), Relation::After);
///
/// let merged = a.merge(&b);
/// assert_eq!(merged.get("alpha"), 1);
/// assert_eq!(merged.get("beta"), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorClock {
    counters: HashMap<String, u64>,
}

impl VectorClock {
    /// Create an empty clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter for the given node by 1.
    ///
    /// Not thread-safe; callers serialize updates per replica.
    pub fn increment(&mut self, node: &str) {
        let entry = self.counters.entry(node.to_string()).or_insert(0);
        *entry += 1;
    }

    /// Get the counter for a node (0 when absent).
    #[inline]
    pub fn get(&self, node: &str) -> u64 {
        self.counters.get(node).copied().unwrap_or(0)
    }

    /// Compare this clock against another.
    ///
    /// Single pass over the key union, short-circuiting to
    /// [`Relation::Concurrent`] as soon as both a lesser and a greater entry
    /// have been seen. Comparing a clock to itself yields [`Relation::Equal`].
    pub fn compare(&self, other: &VectorClock) -> Relation {
        let mut less = false;
        let mut greater = false;

        for (node, &ours) in &self.counters {
            let theirs = other.get(node);
            if ours < theirs {
                less = true;
            } else if ours > theirs {
                greater = true;
            }
            if less && greater {
                return Relation::Concurrent;
            }
        }

        // Keys only the other side has: our entry is implicitly zero.
        for (node, &theirs) in &other.counters {
            if theirs > 0 && !self.counters.contains_key(node) {
                less = true;
                if greater {
                    return Relation::Concurrent;
                }
            }
        }

        match (less, greater) {
            (false, false) => Relation::Equal,
            (true, false) => Relation::Before,
            (false, true) => Relation::After,
            (true, true) => Relation::Concurrent,
        }
    }

    /// Merge two clocks into a fresh one: entry-wise max over the key union.
    ///
    /// Neither input is mutated, and the result shares no state with either.
    pub fn merge(&self, other: &VectorClock) -> VectorClock {
        let mut merged = self.counters.clone();
        for (node, &theirs) in &other.counters {
            merged
                .entry(node.clone())
                .and_modify(|ours| *ours = (*ours).max(theirs))
                .or_insert(theirs);
        }
        VectorClock { counters: merged }
    }

    /// True when this clock strictly dominates the other (happened after).
    pub fn dominates(&self, other: &VectorClock) -> bool {
        self.compare(other) == Relation::After
    }

    /// Iterate over the node ids with an entry in this clock.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.counters.keys().map(String::as_str)
    }

    /// The raw node → counter map.
    pub fn counters(&self) -> &HashMap<String, u64> {
        &self.counters
    }

    /// Sum of all counters: the total number of updates this clock has seen.
    pub fn total(&self) -> u64 {
        self.counters.values().sum()
    }

    /// Number of nodes with an entry.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// True when no node has an entry.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
