//! String rules resolved by length.

use crate::clock::VectorClock;
use crate::rules::MergeRule;

/// Keep the longer string; ties keep local.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestString;

impl MergeRule<String> for LongestString {
    fn merge(&self, local: &String, remote: &String, _lc: &VectorClock, _rc: &VectorClock) -> String {
        if remote.len() > local.len() {
            remote.clone()
        } else {
            local.clone()
        }
    }
}

/// Keep the shorter string; ties keep local.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestString;

impl MergeRule<String> for ShortestString {
    fn merge(&self, local: &String, remote: &String, _lc: &VectorClock, _rc: &VectorClock) -> String {
        if remote.len() < local.len() {
            remote.clone()
        } else {
            local.clone()
        }
    }
}
