//! Stateless per-type merge orchestrator.
//!
//! Built once per mergeable type from its field descriptor. Merging two
//! replicas compares their clocks once, resolves every mergeable field off
//! that relation, copies ignored fields through from the local side, and
//! stamps the result with the pointwise-max clock.

use std::collections::HashMap;

use tracing::debug;

use concord_core::{ConcordResult, MergeError};

use crate::engine::field::{ErasedAccessor, ErasedIgnored, SpecKind};
use crate::engine::mergeable::{Mergeable, Resolver};
use crate::rules::MergeRule;

/// Per-type merge engine.
///
/// Holds one accessor per mergeable field and one handle per ignored field,
/// discovered from [`Mergeable::fields`] at construction. Merges through a
/// shared engine are safe from multiple threads; replacing a rule takes
/// `&mut self` and therefore exclusive access.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use concord_crdt::rules::{BoolOr, FloatMax, SetUnion};
/// use concord_crdt::{FieldSpec, MergeEngine, Mergeable, VectorClock};
///
/// #[derive(Clone, Default)]
/// struct Probe {
///     clock: VectorClock,
///     speed: f64,
///     armed: bool,
///     observers: HashSet<String>,
/// }
///
/// impl Mergeable for Probe {
///     fn clock(&self) -> &VectorClock { &self.clock }
///     fn clock_mut(&mut self) -> &mut VectorClock { &mut self.clock }
///     fn fields() -> Vec<FieldSpec<Self>> {
///         vec![
///             FieldSpec::with_rule("speed", |p: &Probe| &p.speed, |p, v| p.speed = v, FloatMax),
///             FieldSpec::with_rule("armed", |p: &Probe| &p.armed, |p, v| p.armed = v, BoolOr),
///             FieldSpec::with_rule(
///                 "observers",
///                 |p: &Probe| &p.observers,
///                 |p, v| p.observers = v,
///                 SetUnion,
///             ),
///         ]
///     }
/// }
///
/// # fn main() -> concord_crdt::ConcordResult<()> {
/// let engine = MergeEngine::<Probe>::new()?;
///
/// let mut local = Probe::default();
/// local.speed = 40.0;
/// local.touch("a");
///
/// let mut remote = Probe::default();
/// remote.speed = 50.0;
/// remote.armed = true;
/// remote.touch("b");
///
/// // Concurrent updates: each field resolves by its own rule.
/// let merged = engine.merge(&local, &remote);
/// assert_eq!(merged.speed, 50.0);
/// assert!(merged.armed);
/// assert_eq!(merged.clock().get("a"), 1);
/// assert_eq!(merged.clock().get("b"), 1);
/// # Ok(())
/// # }
/// ```
pub struct MergeEngine<T: Mergeable> {
    accessors: Vec<Box<dyn ErasedAccessor<T>>>,
    by_name: HashMap<&'static str, usize>,
    ignored: Vec<Box<dyn ErasedIgnored<T>>>,
}

impl<T: Mergeable> std::fmt::Debug for MergeEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeEngine")
            .field("accessors", &self.accessors.len())
            .field("by_name", &self.by_name)
            .field("ignored", &self.ignored.len())
            .finish()
    }
}

impl<T: Mergeable> MergeEngine<T> {
    /// Build an engine from the type's field descriptor.
    ///
    /// Every field comes up bound to its descriptor rule (default
    /// last-write-wins when none was declared). Fails with
    /// [`MergeError::DuplicateField`] if the descriptor lists a name twice.
    pub fn new() -> ConcordResult<Self> {
        let mut engine = MergeEngine {
            accessors: Vec::new(),
            by_name: HashMap::new(),
            ignored: Vec::new(),
        };
        let mut seen: Vec<&'static str> = Vec::new();

        for spec in T::fields() {
            let name = match &spec.0 {
                SpecKind::Merge(accessor) => accessor.name(),
                SpecKind::Ignore(handle) => handle.name(),
            };
            if seen.contains(&name) {
                return Err(MergeError::DuplicateField {
                    field: name.to_string(),
                });
            }
            seen.push(name);

            match spec.0 {
                SpecKind::Merge(accessor) => {
                    engine.by_name.insert(accessor.name(), engine.accessors.len());
                    engine.accessors.push(accessor);
                }
                SpecKind::Ignore(handle) => engine.ignored.push(handle),
            }
        }

        Ok(engine)
    }

    /// Build an engine and immediately let `resolver` override rule bindings.
    pub fn with_resolver(resolver: &impl Resolver<T>) -> ConcordResult<Self> {
        let mut engine = Self::new()?;
        resolver.register_rules(&mut engine)?;
        Ok(engine)
    }

    /// Replace the rule bound to a mergeable field.
    ///
    /// Fails with [`MergeError::UnknownField`] when no mergeable field has
    /// that name (ignored fields are not rule targets) and with
    /// [`MergeError::TypeMismatch`] when `V` is not the field's value type.
    pub fn set_rule<V: 'static>(
        &mut self,
        field: &str,
        rule: impl MergeRule<V> + 'static,
    ) -> ConcordResult<()> {
        let index = *self
            .by_name
            .get(field)
            .ok_or_else(|| MergeError::UnknownField {
                field: field.to_string(),
            })?;
        debug!(field, rule_type = std::any::type_name::<V>(), "rebinding field rule");
        self.accessors[index].replace_rule(
            Box::new(Box::new(rule) as Box<dyn MergeRule<V>>),
            std::any::type_name::<V>(),
        )
    }

    /// Merge two replicas into a fresh instance.
    ///
    /// The causal relation is computed once from the replica clocks and
    /// drives every field: the causally newer side wins outright
    /// (`Equal` resolves to remote), and `Concurrent` delegates to each
    /// field's bound rule. Ignored fields are copied from `local`; fields a
    /// descriptor does not list stay at their `Default` value. The result
    /// carries the pointwise-max of the two clocks and shares no state with
    /// either input.
    pub fn merge(&self, local: &T, remote: &T) -> T {
        let relation = local.clock().compare(remote.clock());
        debug!(?relation, fields = self.accessors.len(), "merging replicas");

        let mut out = T::default();
        for accessor in &self.accessors {
            accessor.merge_fields(&mut out, local, remote, relation, local.clock(), remote.clock());
        }
        for handle in &self.ignored {
            handle.copy_from(&mut out, local);
        }
        *out.clock_mut() = local.clock().merge(remote.clock());
        out
    }

    /// Merge `remote` into `local` in place.
    ///
    /// Same per-field decisions as [`merge`](Self::merge), written back into
    /// `local`. Ignored fields keep their prior local value; `local`'s clock
    /// is replaced with the merged clock.
    pub fn merge_into(&self, local: &mut T, remote: &T) {
        let local_clock = local.clock().clone();
        let relation = local_clock.compare(remote.clock());
        debug!(?relation, fields = self.accessors.len(), "merging replicas in place");

        for accessor in &self.accessors {
            accessor.merge_in_place(local, remote, relation, &local_clock, remote.clock());
        }
        *local.clock_mut() = local_clock.merge(remote.clock());
    }

    /// Merge with one-sided shortcuts.
    ///
    /// A missing side returns a clone of the other; two missing sides return
    /// `None`; two present sides merge normally.
    pub fn merge_opt(&self, local: Option<&T>, remote: Option<&T>) -> Option<T> {
        match (local, remote) {
            (Some(local), Some(remote)) => Some(self.merge(local, remote)),
            (Some(local), None) => Some(local.clone()),
            (None, Some(remote)) => Some(remote.clone()),
            (None, None) => None,
        }
    }

    /// Names of the mergeable fields, in descriptor order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accessors.iter().map(|accessor| accessor.name())
    }
}
