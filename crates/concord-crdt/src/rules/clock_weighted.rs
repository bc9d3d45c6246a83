//! Rules that decide between sides by interrogating the replica clocks.
//!
//! None of these look at the field values beyond cloning the winner. Each is
//! a whole-value decider: score both clocks, take the side with the higher
//! score, keep local on ties. The tie-break makes every rule here
//! deterministic for a given pair of clocks.

use std::collections::HashMap;

use crate::clock::VectorClock;
use crate::rules::MergeRule;

/// The side whose clock has the greater counter for one designated node wins.
///
/// Useful when a single node is authoritative for a field: whichever side has
/// seen more of that node's updates is the fresher one.
#[derive(Debug, Clone)]
pub struct NodeWins {
    node: String,
}

impl NodeWins {
    /// Designate the authoritative node.
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }
}

impl<V: Clone> MergeRule<V> for NodeWins {
    fn merge(&self, local: &V, remote: &V, lc: &VectorClock, rc: &VectorClock) -> V {
        if rc.get(&self.node) > lc.get(&self.node) {
            remote.clone()
        } else {
            local.clone()
        }
    }
}

/// The side whose clock has seen more updates in total wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostUpdatesWins;

impl<V: Clone> MergeRule<V> for MostUpdatesWins {
    fn merge(&self, local: &V, remote: &V, lc: &VectorClock, rc: &VectorClock) -> V {
        if rc.total() > lc.total() {
            remote.clone()
        } else {
            local.clone()
        }
    }
}

/// The side whose clock has the single largest per-node counter wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestContributionWins;

impl<V: Clone> MergeRule<V> for HighestContributionWins {
    fn merge(&self, local: &V, remote: &V, lc: &VectorClock, rc: &VectorClock) -> V {
        let peak = |clock: &VectorClock| clock.counters().values().copied().max().unwrap_or(0);
        if peak(rc) > peak(lc) {
            remote.clone()
        } else {
            local.clone()
        }
    }
}

/// The side with the greater trust-weighted update count wins.
///
/// Score = Σ counter × weight(node), with unlisted nodes weighted 1.0. The
/// weight table lets more-trusted nodes' updates count for more when deciding
/// which side of a concurrent pair to keep.
#[derive(Debug, Clone, Default)]
pub struct TrustWeighted {
    weights: HashMap<String, f64>,
}

impl TrustWeighted {
    /// Create a decider from a node → weight table.
    pub fn new(weights: HashMap<String, f64>) -> Self {
        Self { weights }
    }

    fn score(&self, clock: &VectorClock) -> f64 {
        clock
            .counters()
            .iter()
            .map(|(node, &count)| {
                let weight = self.weights.get(node).copied().unwrap_or(1.0);
                count as f64 * weight
            })
            .sum()
    }
}

impl<V: Clone> MergeRule<V> for TrustWeighted {
    fn merge(&self, local: &V, remote: &V, lc: &VectorClock, rc: &VectorClock) -> V {
        if self.score(rc) > self.score(lc) {
            remote.clone()
        } else {
            local.clone()
        }
    }
}

/// The side whose clock has entries from more nodes wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVote;

impl<V: Clone> MergeRule<V> for MajorityVote {
    fn merge(&self, local: &V, remote: &V, lc: &VectorClock, rc: &VectorClock) -> V {
        if rc.len() > lc.len() {
            remote.clone()
        } else {
            local.clone()
        }
    }
}

/// The side whose smallest node id sorts first wins.
///
/// An empty clock has no smallest node and loses to any non-empty one; two
/// empty clocks keep local.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicographicNodeWins;

impl<V: Clone> MergeRule<V> for LexicographicNodeWins {
    fn merge(&self, local: &V, remote: &V, lc: &VectorClock, rc: &VectorClock) -> V {
        let first = |clock: &VectorClock| clock.nodes().min().map(str::to_string);
        match (first(lc), first(rc)) {
            (Some(ours), Some(theirs)) if theirs < ours => remote.clone(),
            (None, Some(_)) => remote.clone(),
            _ => local.clone(),
        }
    }
}
