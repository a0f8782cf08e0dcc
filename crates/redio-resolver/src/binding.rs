//! The binding table: resolved type parameters.
//!
//! Maps a provider type and a parameter `(owner, index)` declared somewhere
//! in its ancestry to the concrete type that provider binds it to. The same
//! parameter can be bound differently by different providers
//! (`Delegate.M` is `Listener` for one subclass and `Supplier` for another),
//! so the provider is part of the key.
//!
//! The table is append-only. The first recorded binding for a key is kept
//! forever; later writes for the same key are ignored. Recomputing a binding
//! is idempotent, so racing writers on the same key agree and no further
//! synchronization is needed.

use dashmap::DashMap;
use redio_common::{DefId, ParamRef};
use tracing::trace;

#[derive(Debug, Default)]
pub struct BindingTable {
    /// (provider, parameter) -> concrete
    bindings: DashMap<(DefId, ParamRef), DefId>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The concrete type `provider` binds `param` to, if recorded.
    pub fn get(&self, provider: DefId, param: ParamRef) -> Option<DefId> {
        self.bindings.get(&(provider, param)).map(|r| *r)
    }

    pub fn contains(&self, provider: DefId, param: ParamRef) -> bool {
        self.bindings.contains_key(&(provider, param))
    }

    /// Record a binding unless one already exists.
    ///
    /// Returns the binding held by the table afterwards, which is the earlier
    /// one if the key was already bound.
    pub fn record(&self, provider: DefId, param: ParamRef, concrete: DefId) -> DefId {
        let kept = *self.bindings.entry((provider, param)).or_insert(concrete);
        trace!(
            provider = %provider,
            owner = %param.owner,
            index = param.index,
            concrete = %concrete,
            kept = %kept,
            "BindingTable::record"
        );
        kept
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings recorded for `provider`, ordered by parameter.
    pub fn for_provider(&self, provider: DefId) -> Vec<(ParamRef, DefId)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .filter(|r| r.key().0 == provider)
            .map(|r| (r.key().1, *r.value()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// All bindings, ordered by provider then parameter (for debugging/testing).
    pub fn entries(&self) -> Vec<(DefId, ParamRef, DefId)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|r| (r.key().0, r.key().1, *r.value()))
            .collect();
        entries.sort_unstable();
        entries
    }
}
