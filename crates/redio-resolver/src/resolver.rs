//! The type-graph resolver.
//!
//! A *selector* is a class whose only supertype edge is `Selector<X>`. Given
//! a selector and a provider type, the resolver answers which concrete type
//! `X` stands for:
//!
//! 1. `X` concrete: returned as is (fast path). `X` an instantiation:
//!    its raw type.
//! 2. `X` a parameter reference: looked up in the binding table under the
//!    provider.
//! 3. On a miss the provider's ancestry is expanded, every binding it
//!    implies is recorded under the provider, and the lookup is retried once.
//!
//! The binding table and the ancestry cache live as long as the resolver,
//! so a resolver is the composition root for "resolve once, remember".

use crate::ancestry::Ancestry;
use crate::binding::BindingTable;
use crate::error::ResolveError;
use dashmap::DashMap;
use redio_common::{
    DefId, HierarchyMetadata, HierarchyNode, HierarchyStore, Instantiation, ParamRef, TypeDescriptor,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, trace};

/// Name under which the resolver base is registered.
pub const SELECTOR_BASE_NAME: &str = "Selector";

pub struct TypeGraphResolver {
    store: Arc<HierarchyStore>,
    /// `Selector<T>`
    base: DefId,
    bindings: BindingTable,
    /// Provider -> expanded ancestry
    ancestry: DashMap<DefId, Arc<Ancestry>>,
    next_selector: AtomicU32,
}

impl TypeGraphResolver {
    /// Create a resolver over `store`.
    ///
    /// Reuses a registered one-parameter `Selector` class as the base, or
    /// registers one.
    pub fn new(store: Arc<HierarchyStore>) -> Self {
        let existing = store.lookup(SELECTOR_BASE_NAME).filter(|id| {
            store
                .get(*id)
                .is_some_and(|node| !node.is_interface() && node.type_params.len() == 1)
        });
        let base = existing
            .unwrap_or_else(|| store.register(HierarchyNode::class(SELECTOR_BASE_NAME, &["T"])));
        debug!(base = %base, reused = existing.is_some(), "TypeGraphResolver::new");
        Self {
            store,
            base,
            bindings: BindingTable::new(),
            ancestry: DashMap::new(),
            next_selector: AtomicU32::new(1),
        }
    }

    /// The resolver base, `Selector<T>`.
    pub fn selector_base(&self) -> DefId {
        self.base
    }

    pub fn store(&self) -> &Arc<HierarchyStore> {
        &self.store
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Register an anonymous selector `extends Selector<target>`.
    pub fn declare_selector(&self, target: TypeDescriptor) -> DefId {
        let n = self.next_selector.fetch_add(1, Ordering::Relaxed);
        let edge = Instantiation::new(self.base, vec![target]);
        let name = format!("{}${n}", self.store.describe(&edge.clone().into()));
        self.store
            .register(HierarchyNode::class(name, &[]).with_extends(edge))
    }

    /// Resolve the concrete type selected by `self_type`, using `provider`'s
    /// hierarchy to bind parameter references.
    #[tracing::instrument(level = "debug", skip_all, fields(self_type = %self_type, provider = %provider))]
    pub fn resolve(&self, self_type: DefId, provider: DefId) -> Result<DefId, ResolveError> {
        match self.selected_target(self_type)? {
            TypeDescriptor::Concrete(id) => {
                trace!(concrete = %id, "fast path");
                Ok(id)
            }
            TypeDescriptor::Instantiation(inst) => {
                trace!(raw = %inst.raw, "instantiation collapses to raw type");
                Ok(inst.raw)
            }
            TypeDescriptor::ParameterRef(param) => self.resolve_parameter(param, provider),
        }
    }

    /// Resolve a bare parameter reference against `provider`.
    ///
    /// Only bindings `provider` itself implies are used; what another
    /// provider binds the same parameter to never leaks into the answer.
    pub fn resolve_parameter(&self, param: ParamRef, provider: DefId) -> Result<DefId, ResolveError> {
        if let Some(hit) = self.bindings.get(provider, param) {
            trace!(concrete = %hit, "binding table hit");
            return Ok(hit);
        }

        let ancestry = self.ancestry(provider);
        let mut recorded = 0usize;
        for (bound, concrete) in ancestry.bindings() {
            self.bindings.record(provider, bound, concrete);
            recorded += 1;
        }
        debug!(
            provider = %provider,
            recorded,
            table_len = self.bindings.len(),
            "expanded provider ancestry"
        );

        self.bindings
            .get(provider, param)
            .ok_or_else(|| ResolveError::TypeResolution {
                target: self.store.describe(&TypeDescriptor::ParameterRef(param)),
                provider: self.store.display_name(provider),
            })
    }

    /// Expanded ancestry of `provider`, computed once per resolver.
    pub fn ancestry(&self, provider: DefId) -> Arc<Ancestry> {
        if let Some(cached) = self.ancestry.get(&provider) {
            return Arc::clone(&cached);
        }
        let expanded = Arc::new(Ancestry::expand(self.store.as_ref(), provider));
        Arc::clone(self.ancestry.entry(provider).or_insert(expanded).value())
    }

    /// Check that `self_type` is a direct, sole specialization of the base
    /// and return the argument it selects.
    fn selected_target(&self, self_type: DefId) -> Result<TypeDescriptor, ResolveError> {
        let misuse = || ResolveError::StructuralMisuse {
            self_type: self.store.display_name(self_type),
            base: self.store.display_name(self.base),
        };
        let node = self.store.get(self_type).ok_or_else(misuse)?;
        if node.is_interface() || !node.implements.is_empty() {
            return Err(misuse());
        }
        match node.extends {
            Some(edge) if edge.raw == self.base && edge.args.len() == 1 => {
                edge.args.into_iter().next().ok_or_else(misuse)
            }
            _ => Err(misuse()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
