//! The per-type merge engine.
//!
//! [`Mergeable`] types describe their fields once via a hand-written
//! descriptor; [`MergeEngine`] turns that descriptor into typed accessors at
//! construction and drives per-field resolution off the object-level causal
//! relation.

pub mod field;
pub mod merge_engine;
pub mod mergeable;

pub use field::FieldSpec;
pub use merge_engine::MergeEngine;
pub use mergeable::{Mergeable, Resolver};
