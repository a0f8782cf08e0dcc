//! Hierarchy storage.
//!
//! `HierarchyMetadata` is the query seam the resolver and the delegate use
//! to inspect declared types. `HierarchyStore` is its thread-safe backing
//! store: a `DashMap` of nodes plus a name index, filled by explicit
//! registration or by [`HierarchyStore::declare`].

use crate::def::{DefId, DefKind, HierarchyNode, MethodInfo};
use crate::types::{Instantiation, TypeDescriptor};
use dashmap::DashMap;
use smallvec::SmallVec;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Global counter for assigning unique instance IDs to `HierarchyStore` instances.
/// Only used to tell stores apart in trace output.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// HierarchyMetadata - Query Trait
// =============================================================================

/// Read-only view of a declared type hierarchy.
///
/// For any `DefId` this exposes the declared parameters, the superclass edge
/// with its instantiation arguments, and the directly implemented interfaces
/// with theirs. Unknown ids answer `None` / empty.
pub trait HierarchyMetadata {
    /// Full node metadata.
    fn node(&self, id: DefId) -> Option<HierarchyNode>;

    /// Find a type by name.
    fn lookup(&self, name: &str) -> Option<DefId>;

    fn name_of(&self, id: DefId) -> Option<String> {
        self.node(id).map(|n| n.name)
    }

    fn kind_of(&self, id: DefId) -> Option<DefKind> {
        self.node(id).map(|n| n.kind)
    }

    fn type_params(&self, id: DefId) -> SmallVec<[String; 2]> {
        self.node(id).map(|n| n.type_params).unwrap_or_default()
    }

    fn extends(&self, id: DefId) -> Option<Instantiation> {
        self.node(id).and_then(|n| n.extends)
    }

    fn implements(&self, id: DefId) -> SmallVec<[Instantiation; 2]> {
        self.node(id).map(|n| n.implements).unwrap_or_default()
    }

    fn methods(&self, id: DefId) -> Vec<MethodInfo> {
        self.node(id).map(|n| n.methods).unwrap_or_default()
    }

    /// Render a type usage with declared names, e.g. `Base<String, Mid.X>`.
    fn describe(&self, ty: &TypeDescriptor) -> String {
        let mut out = String::new();
        describe_into(self, ty, &mut out);
        out
    }

    /// Display name for a `DefId`, falling back to the raw id.
    fn display_name(&self, id: DefId) -> String {
        self.name_of(id).unwrap_or_else(|| id.to_string())
    }
}

fn describe_into<M: HierarchyMetadata + ?Sized>(meta: &M, ty: &TypeDescriptor, out: &mut String) {
    match ty {
        TypeDescriptor::Concrete(id) => out.push_str(&meta.display_name(*id)),
        TypeDescriptor::ParameterRef(param) => {
            let owner = meta.node(param.owner);
            match owner {
                Some(node) => match node.type_param(param.index) {
                    Some(name) => {
                        let _ = write!(out, "{}.{}", node.name, name);
                    }
                    None => {
                        let _ = write!(out, "{}.${}", node.name, param.index);
                    }
                },
                None => {
                    let _ = write!(out, "{}.${}", param.owner, param.index);
                }
            }
        }
        TypeDescriptor::Instantiation(inst) => {
            out.push_str(&meta.display_name(inst.raw));
            if inst.is_generic() {
                out.push('<');
                for (i, arg) in inst.args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    describe_into(meta, arg, out);
                }
                out.push('>');
            }
        }
    }
}

// =============================================================================
// HierarchyStore - Storage for Nodes
// =============================================================================

/// Thread-safe storage for hierarchy nodes.
///
/// Uses `DashMap` so one store can be shared by every resolver and delegate
/// context of a composition root.
///
/// ## Usage
///
/// ```ignore
/// let store = HierarchyStore::new();
///
/// let listener = store.register(
///     HierarchyNode::interface("Listener", &[])
///         .with_method(MethodInfo::abstract_method("on_event", 2)),
/// );
/// let base = store.register_with(|this| {
///     HierarchyNode::class("Base", &["T"])
///         .implementing(Instantiation::new(sink, vec![TypeDescriptor::param(this, 0)]))
/// });
/// ```
pub struct HierarchyStore {
    /// Unique instance ID for debugging (tracks which store instance this is)
    instance_id: u64,

    /// `DefId` -> `HierarchyNode` mapping
    nodes: DashMap<DefId, HierarchyNode>,

    /// Name -> `DefId`; the first registration of a name wins
    by_name: DashMap<String, DefId>,

    /// Next available `DefId`
    next_id: AtomicU32,
}

impl Default for HierarchyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "HierarchyStore::new");
        Self {
            instance_id,
            nodes: DashMap::new(),
            by_name: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
        }
    }

    /// Allocate a fresh `DefId`.
    pub(crate) fn allocate(&self) -> DefId {
        DefId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Insert a node under an already allocated id.
    pub(crate) fn insert(&self, id: DefId, node: HierarchyNode) {
        trace!(
            instance_id = self.instance_id,
            def_id = %id,
            name = %node.name,
            kind = ?node.kind,
            "HierarchyStore::register"
        );
        self.by_name.entry(node.name.clone()).or_insert(id);
        self.nodes.insert(id, node);
    }

    /// Register a new node and return its `DefId`.
    pub fn register(&self, node: HierarchyNode) -> DefId {
        let id = self.allocate();
        self.insert(id, node);
        id
    }

    /// Register a node whose edges refer to its own parameters.
    ///
    /// `build` receives the id the node will be stored under.
    pub fn register_with(&self, build: impl FnOnce(DefId) -> HierarchyNode) -> DefId {
        let id = self.allocate();
        let node = build(id);
        self.insert(id, node);
        id
    }

    /// Get node metadata by `DefId`.
    pub fn get(&self, id: DefId) -> Option<HierarchyNode> {
        self.nodes.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: DefId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Check if a name is already registered.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Replace the supertype edges of a node (for two-phase registration).
    pub fn set_heritage(&self, id: DefId, extends: Option<Instantiation>, implements: Vec<Instantiation>) {
        if let Some(mut entry) = self.nodes.get_mut(&id) {
            entry.extends = extends;
            entry.implements = implements.into();
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get all `DefId`s in allocation order (for debugging/testing).
    pub fn all_ids(&self) -> Vec<DefId> {
        let mut ids: Vec<DefId> = self.nodes.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }
}

impl HierarchyMetadata for HierarchyStore {
    fn node(&self, id: DefId) -> Option<HierarchyNode> {
        self.get(id)
    }

    fn lookup(&self, name: &str) -> Option<DefId> {
        self.by_name.get(name).map(|r| *r)
    }

    fn name_of(&self, id: DefId) -> Option<String> {
        self.nodes.get(&id).map(|r| r.name.clone())
    }

    fn kind_of(&self, id: DefId) -> Option<DefKind> {
        self.nodes.get(&id).map(|r| r.kind)
    }

    fn type_params(&self, id: DefId) -> SmallVec<[String; 2]> {
        self.nodes
            .get(&id)
            .map(|r| r.type_params.clone())
            .unwrap_or_default()
    }

    fn extends(&self, id: DefId) -> Option<Instantiation> {
        self.nodes.get(&id).and_then(|r| r.extends.clone())
    }

    fn implements(&self, id: DefId) -> SmallVec<[Instantiation; 2]> {
        self.nodes
            .get(&id)
            .map(|r| r.implements.clone())
            .unwrap_or_default()
    }

    fn methods(&self, id: DefId) -> Vec<MethodInfo> {
        self.nodes
            .get(&id)
            .map(|r| r.methods.clone())
            .unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
