//! The `Mergeable` capability and the mutate-then-touch update discipline.

use concord_core::{ConcordResult, UpdateError};

use crate::clock::VectorClock;
use crate::engine::field::FieldSpec;
use crate::engine::merge_engine::MergeEngine;

/// A replicated record the engine knows how to merge.
///
/// Implementors carry one [`VectorClock`] and describe their data fields
/// once via [`fields`](Self::fields). The descriptor is expected to be
/// exhaustive: a field it does not list is neither merged nor copied, so a
/// full merge leaves it at its `Default` value.
///
/// # Examples
///
/// ```
/// use concord_crdt::rules::FloatMax;
/// use concord_crdt::{FieldSpec, Mergeable, VectorClock};
///
/// #[derive(Clone, Default)]
/// struct Reading {
///     clock: VectorClock,
///     level: f64,
///     // Local diagnostics never travel between replicas.
///     probe_log: String,
/// }
///
/// impl Mergeable for Reading {
///     fn clock(&self) -> &VectorClock { &self.clock }
///     fn clock_mut(&mut self) -> &mut VectorClock { &mut self.clock }
///     fn fields() -> Vec<FieldSpec<Self>> {
///         vec![
///             FieldSpec::with_rule("level", |r: &Reading| &r.level, |r, v| r.level = v, FloatMax),
///             FieldSpec::ignored("probe_log", |r: &Reading| &r.probe_log, |r, v| r.probe_log = v),
///         ]
///     }
/// }
///
/// let mut reading = Reading::default();
/// reading.level = 7.5;
/// reading.touch("station-1");
/// assert_eq!(reading.clock().get("station-1"), 1);
/// ```
pub trait Mergeable: Clone + Default + 'static {
    /// The replica's causal history.
    fn clock(&self) -> &VectorClock;

    /// Mutable access to the clock; used by the engine and by `touch`.
    fn clock_mut(&mut self) -> &mut VectorClock;

    /// The field descriptor: one [`FieldSpec`] per data field. The clock is
    /// not a data field and must not appear here.
    fn fields() -> Vec<FieldSpec<Self>>;

    /// Record one local update originating at `node`.
    fn touch(&mut self, node: &str) {
        self.clock_mut().increment(node);
    }

    /// Run a fallible mutation and advance the clock only on success.
    ///
    /// An empty node id is rejected before the mutation runs. A mutation
    /// error propagates transparently and leaves the clock untouched. This
    /// mutate-then-touch coupling is the only sanctioned way clocks advance.
    ///
    /// # Examples
    ///
    /// ```
    /// # use concord_crdt::rules::FloatMax;
    /// # use concord_crdt::{FieldSpec, Mergeable, VectorClock};
    /// # #[derive(Clone, Default)]
    /// # struct Reading { clock: VectorClock, level: f64 }
    /// # impl Mergeable for Reading {
    /// #     fn clock(&self) -> &VectorClock { &self.clock }
    /// #     fn clock_mut(&mut self) -> &mut VectorClock { &mut self.clock }
    /// #     fn fields() -> Vec<FieldSpec<Self>> {
    /// #         vec![FieldSpec::with_rule("level", |r: &Reading| &r.level, |r, v| r.level = v, FloatMax)]
    /// #     }
    /// # }
    /// let mut reading = Reading::default();
    /// reading
    ///     .try_update("station-1", |r| -> Result<(), std::io::Error> {
    ///         r.level = 9.0;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    /// assert_eq!(reading.clock().get("station-1"), 1);
    /// ```
    fn try_update<E, F>(&mut self, node: &str, mutate: F) -> Result<(), UpdateError<E>>
    where
        E: std::error::Error,
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        if node.is_empty() {
            return Err(UpdateError::EmptyNodeId);
        }
        mutate(self)?;
        self.touch(node);
        Ok(())
    }
}

/// Pluggable rule registration, invoked once at engine construction.
///
/// A resolver programmatically binds rules over the descriptor's bindings.
/// It is the highest-precedence binding source and can be shared between
/// types whose descriptors it does not control.
pub trait Resolver<T: Mergeable> {
    /// Bind rules into a freshly constructed engine.
    fn register_rules(&self, engine: &mut MergeEngine<T>) -> ConcordResult<()>;
}
