//! Error types, grouped by concern.

pub mod merge_error;
pub mod update_error;

pub use merge_error::MergeError;
pub use update_error::UpdateError;

/// Result alias used across the workspace.
pub type ConcordResult<T> = Result<T, MergeError>;
