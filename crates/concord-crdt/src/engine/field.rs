//! Field descriptors and the erased accessors built from them.
//!
//! A [`FieldSpec`] is one entry of a type's mergeable descriptor: a stable
//! name, getter/setter function pointers, and either a rule binding or the
//! ignore marker. The engine turns specs into accessors once at
//! construction; per-merge resolution goes through the compiled function
//! pointers with no further lookup.

use std::any::Any;

use concord_core::{ConcordResult, MergeError};

use crate::clock::{Relation, VectorClock};
use crate::rules::{LastWriteWins, MergeRule};

/// One entry of a type's field descriptor.
///
/// Built with [`FieldSpec::merged`] (default rule), [`FieldSpec::with_rule`]
/// (declared rule), or [`FieldSpec::ignored`] (excluded from merging).
pub struct FieldSpec<T>(pub(crate) SpecKind<T>);

pub(crate) enum SpecKind<T> {
    Merge(Box<dyn ErasedAccessor<T>>),
    Ignore(Box<dyn ErasedIgnored<T>>),
}

impl<T: 'static> FieldSpec<T> {
    /// A mergeable field bound to the default rule (vector-clock
    /// last-write-wins).
    pub fn merged<V: Clone + 'static>(
        name: &'static str,
        get: fn(&T) -> &V,
        set: fn(&mut T, V),
    ) -> Self {
        Self::with_rule(name, get, set, LastWriteWins)
    }

    /// A mergeable field bound to a declared rule.
    pub fn with_rule<V: Clone + 'static>(
        name: &'static str,
        get: fn(&T) -> &V,
        set: fn(&mut T, V),
        rule: impl MergeRule<V> + 'static,
    ) -> Self {
        FieldSpec(SpecKind::Merge(Box::new(TypedAccessor {
            name,
            get,
            set,
            rule: Box::new(rule),
        })))
    }

    /// A field excluded from merging: copied from the local side on a full
    /// merge, left untouched by an in-place merge.
    pub fn ignored<V: Clone + 'static>(
        name: &'static str,
        get: fn(&T) -> &V,
        set: fn(&mut T, V),
    ) -> Self {
        FieldSpec(SpecKind::Ignore(Box::new(TypedIgnored { name, get, set })))
    }
}

/// Object-safe view of a typed mergeable accessor.
pub(crate) trait ErasedAccessor<T>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolve the field from `local`/`remote` and write it into `out`.
    fn merge_fields(
        &self,
        out: &mut T,
        local: &T,
        remote: &T,
        relation: Relation,
        lc: &VectorClock,
        rc: &VectorClock,
    );

    /// Resolve the field and write it back into `local`.
    fn merge_in_place(
        &self,
        local: &mut T,
        remote: &T,
        relation: Relation,
        lc: &VectorClock,
        rc: &VectorClock,
    );

    /// Replace the bound rule. `rule` must be a `Box<dyn MergeRule<V>>` for
    /// this accessor's value type; `supplied` names the value type the caller
    /// provided, for the mismatch error.
    fn replace_rule(&mut self, rule: Box<dyn Any>, supplied: &'static str) -> ConcordResult<()>;
}

/// Object-safe view of an ignored-field handle.
pub(crate) trait ErasedIgnored<T>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Copy the field from `src` into `dst`.
    fn copy_from(&self, dst: &mut T, src: &T);
}

struct TypedAccessor<T, V> {
    name: &'static str,
    get: fn(&T) -> &V,
    set: fn(&mut T, V),
    rule: Box<dyn MergeRule<V>>,
}

impl<T, V: Clone> TypedAccessor<T, V> {
    fn resolve(
        &self,
        local: &T,
        remote: &T,
        relation: Relation,
        lc: &VectorClock,
        rc: &VectorClock,
    ) -> V {
        match relation {
            Relation::After => (self.get)(local).clone(),
            Relation::Before | Relation::Equal => (self.get)(remote).clone(),
            Relation::Concurrent => self.rule.merge((self.get)(local), (self.get)(remote), lc, rc),
        }
    }
}

impl<T, V: Clone + 'static> ErasedAccessor<T> for TypedAccessor<T, V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn merge_fields(
        &self,
        out: &mut T,
        local: &T,
        remote: &T,
        relation: Relation,
        lc: &VectorClock,
        rc: &VectorClock,
    ) {
        let value = self.resolve(local, remote, relation, lc, rc);
        (self.set)(out, value);
    }

    fn merge_in_place(
        &self,
        local: &mut T,
        remote: &T,
        relation: Relation,
        lc: &VectorClock,
        rc: &VectorClock,
    ) {
        let value = self.resolve(local, remote, relation, lc, rc);
        (self.set)(local, value);
    }

    fn replace_rule(&mut self, rule: Box<dyn Any>, supplied: &'static str) -> ConcordResult<()> {
        match rule.downcast::<Box<dyn MergeRule<V>>>() {
            Ok(rule) => {
                self.rule = *rule;
                Ok(())
            }
            Err(_) => Err(MergeError::TypeMismatch {
                field: self.name.to_string(),
                expected: std::any::type_name::<V>(),
                found: supplied,
            }),
        }
    }
}

struct TypedIgnored<T, V> {
    name: &'static str,
    get: fn(&T) -> &V,
    set: fn(&mut T, V),
}

impl<T, V: Clone> ErasedIgnored<T> for TypedIgnored<T, V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn copy_from(&self, dst: &mut T, src: &T) {
        let value = (self.get)(src).clone();
        (self.set)(dst, value);
    }
}
