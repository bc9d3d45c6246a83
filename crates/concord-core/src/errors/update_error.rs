/// Errors from the mutate-then-touch update helper.
///
/// `E` is the error type of the user-supplied mutation. A mutation failure is
/// propagated transparently; the replica's clock is not advanced.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError<E: std::error::Error> {
    #[error("node id must not be empty")]
    EmptyNodeId,

    #[error(transparent)]
    Mutation(#[from] E),
}
