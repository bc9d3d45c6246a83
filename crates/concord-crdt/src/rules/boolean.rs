//! Boolean rules.
//!
//! `BoolOr` is the sticky-flag rule: once any replica sets the flag it stays
//! set. `BoolAnd` is the dual: the flag survives only if every replica keeps
//! it. Both are commutative, associative, and idempotent, so replicas
//! converge under arbitrary merge order.

use crate::clock::VectorClock;
use crate::rules::MergeRule;

/// `local ∨ remote`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolOr;

impl MergeRule<bool> for BoolOr {
    fn merge(&self, local: &bool, remote: &bool, _lc: &VectorClock, _rc: &VectorClock) -> bool {
        *local || *remote
    }
}

/// `local ∧ remote`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolAnd;

impl MergeRule<bool> for BoolAnd {
    fn merge(&self, local: &bool, remote: &bool, _lc: &VectorClock, _rc: &VectorClock) -> bool {
        *local && *remote
    }
}
