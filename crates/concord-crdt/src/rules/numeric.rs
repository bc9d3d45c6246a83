//! Numeric rules over `i64` and `f64`.

use crate::clock::VectorClock;
use crate::rules::MergeRule;

/// `local + remote`.
///
/// Suitable for fields that accumulate independent contributions. Not
/// idempotent (merging a replica with itself doubles the value), so it
/// belongs on fields where each concurrent pair is merged exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntSum;

impl MergeRule<i64> for IntSum {
    fn merge(&self, local: &i64, remote: &i64, _lc: &VectorClock, _rc: &VectorClock) -> i64 {
        local + remote
    }
}

/// `max(local, remote)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntMax;

impl MergeRule<i64> for IntMax {
    fn merge(&self, local: &i64, remote: &i64, _lc: &VectorClock, _rc: &VectorClock) -> i64 {
        (*local).max(*remote)
    }
}

/// `min(local, remote)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntMin;

impl MergeRule<i64> for IntMin {
    fn merge(&self, local: &i64, remote: &i64, _lc: &VectorClock, _rc: &VectorClock) -> i64 {
        (*local).min(*remote)
    }
}

/// `max(local, remote)` over floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatMax;

impl MergeRule<f64> for FloatMax {
    fn merge(&self, local: &f64, remote: &f64, _lc: &VectorClock, _rc: &VectorClock) -> f64 {
        local.max(*remote)
    }
}

/// `min(local, remote)` over floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatMin;

impl MergeRule<f64> for FloatMin {
    fn merge(&self, local: &f64, remote: &f64, _lc: &VectorClock, _rc: &VectorClock) -> f64 {
        local.min(*remote)
    }
}

/// Arithmetic mean of the two sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatAverage;

impl MergeRule<f64> for FloatAverage {
    fn merge(&self, local: &f64, remote: &f64, _lc: &VectorClock, _rc: &VectorClock) -> f64 {
        (local + remote) / 2.0
    }
}

/// Weighted blend `local·(1−w) + remote·w`.
///
/// A weight of 0.0 keeps the local value, 1.0 takes the remote value, 0.5 is
/// [`FloatAverage`].
#[derive(Debug, Clone, Copy)]
pub struct FloatBlend {
    weight: f64,
}

impl FloatBlend {
    /// Create a blend rule giving the remote side weight `w`.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl MergeRule<f64> for FloatBlend {
    fn merge(&self, local: &f64, remote: &f64, _lc: &VectorClock, _rc: &VectorClock) -> f64 {
        local * (1.0 - self.weight) + remote * self.weight
    }
}
