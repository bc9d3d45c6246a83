//! # concord-crdt
//!
//! Deterministic reconciliation of replicas in a multi-master, eventually
//! consistent system:
//! - Vector clocks with causal comparison (`Before` / `After` / `Equal` /
//!   `Concurrent`)
//! - A per-field merge engine driven by the object-level causal relation
//! - A catalog of CRDT-style field rules (set union, boolean or/and, numeric
//!   max/min/sum, list append, map merge, clock-weighted deciders, ...)
//!
//! Each replica carries one [`VectorClock`]. Merging two replicas compares
//! the clocks once, then resolves every field: the causally newer side wins
//! outright, and truly concurrent updates are delegated to the field's bound
//! [`MergeRule`].

pub mod clock;
pub mod engine;
pub mod rules;

pub use clock::{Relation, VectorClock};
pub use engine::{FieldSpec, MergeEngine, Mergeable, Resolver};
pub use rules::MergeRule;

// The error types live in concord-core; re-export them so most users only
// ever import from this crate.
pub use concord_core::{ConcordResult, MergeError, UpdateError};
