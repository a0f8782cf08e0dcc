//! The delegate composition root.
//!
//! A `DelegateContext` ties a resolver to the `Delegate<M>` base node and to
//! the anonymous selector `Selector<Delegate.M>` used for automatic shape
//! discovery. Create one per hierarchy store and share it; every delegate
//! constructed through it reuses the resolver's binding table.

use redio_common::{DefId, HierarchyMetadata, HierarchyNode, HierarchyStore, TypeDescriptor};
use redio_resolver::TypeGraphResolver;
use std::sync::Arc;
use tracing::debug;

/// Name under which the delegate base is registered.
pub const DELEGATE_BASE_NAME: &str = "Delegate";

pub struct DelegateContext {
    resolver: Arc<TypeGraphResolver>,
    /// `Delegate<M>`
    base: DefId,
    /// `Selector<Delegate.M>`
    selector: DefId,
}

impl DelegateContext {
    /// Create a context with its own resolver over `store`.
    pub fn new(store: Arc<HierarchyStore>) -> Self {
        Self::with_resolver(Arc::new(TypeGraphResolver::new(store)))
    }

    /// Create a context sharing an existing resolver.
    ///
    /// Reuses a registered one-parameter `Delegate` class as the base, or
    /// registers one.
    pub fn with_resolver(resolver: Arc<TypeGraphResolver>) -> Self {
        let store = resolver.store();
        let base = store
            .lookup(DELEGATE_BASE_NAME)
            .filter(|id| {
                store
                    .get(*id)
                    .is_some_and(|node| !node.is_interface() && node.type_params.len() == 1)
            })
            .unwrap_or_else(|| store.register(HierarchyNode::class(DELEGATE_BASE_NAME, &["M"])));
        let selector = resolver.declare_selector(TypeDescriptor::param(base, 0));
        debug!(base = %base, selector = %selector, "DelegateContext::with_resolver");
        Self {
            resolver,
            base,
            selector,
        }
    }

    pub fn resolver(&self) -> &Arc<TypeGraphResolver> {
        &self.resolver
    }

    pub fn store(&self) -> &Arc<HierarchyStore> {
        self.resolver.store()
    }

    /// The `Delegate<M>` base that delegate subclasses extend.
    pub fn delegate_base(&self) -> DefId {
        self.base
    }

    /// The selector resolving `Delegate.M`.
    pub fn selector(&self) -> DefId {
        self.selector
    }
}
