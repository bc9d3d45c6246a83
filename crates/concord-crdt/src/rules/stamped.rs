//! Tagged register rules: values carrying their own timestamp or priority.
//!
//! These mirror a last-writer-wins register where the ordering metadata
//! travels with the value instead of being derived from the replica clocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::VectorClock;
use crate::rules::MergeRule;

/// A value paired with the wall-clock instant it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    pub value: T,
    pub at: DateTime<Utc>,
}

impl<T> Stamped<T> {
    /// Stamp a value with the given instant.
    pub fn new(value: T, at: DateTime<Utc>) -> Self {
        Self { value, at }
    }
}

/// Keep whichever side carries the later instant; ties keep local.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampWins;

impl<T: Clone> MergeRule<Stamped<T>> for TimestampWins {
    fn merge(
        &self,
        local: &Stamped<T>,
        remote: &Stamped<T>,
        _lc: &VectorClock,
        _rc: &VectorClock,
    ) -> Stamped<T> {
        if remote.at > local.at {
            remote.clone()
        } else {
            local.clone()
        }
    }
}

/// A value paired with an explicit priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prioritized<T> {
    pub value: T,
    pub priority: i64,
}

impl<T> Prioritized<T> {
    /// Attach a priority to a value.
    pub fn new(value: T, priority: i64) -> Self {
        Self { value, priority }
    }
}

/// Keep whichever side carries the higher priority; ties keep local.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityWins;

impl<T: Clone> MergeRule<Prioritized<T>> for PriorityWins {
    fn merge(
        &self,
        local: &Prioritized<T>,
        remote: &Prioritized<T>,
        _lc: &VectorClock,
        _rc: &VectorClock,
    ) -> Prioritized<T> {
        if remote.priority > local.priority {
            remote.clone()
        } else {
            local.clone()
        }
    }
}
