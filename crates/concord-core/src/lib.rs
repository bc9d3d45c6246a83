//! # concord-core
//!
//! Foundation crate for the Concord replica reconciliation library.
//! Defines the error taxonomy and shared result alias.
//! Every other crate in the workspace depends on this.

pub mod errors;

// Re-export the most commonly used types at the crate root.
pub use errors::{ConcordResult, MergeError, UpdateError};
