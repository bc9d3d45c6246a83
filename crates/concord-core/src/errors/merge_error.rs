/// Merge engine errors.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("unknown mergeable field: {field}")]
    UnknownField { field: String },

    #[error("rule value type mismatch for field {field}: field holds {expected}, rule merges {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field listed twice in descriptor: {field}")]
    DuplicateField { field: String },
}
