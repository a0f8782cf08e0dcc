//! Ancestry expansion.
//!
//! Expanding a type collects, from the type itself and everything it
//! inherits from (superclass chain and interfaces, transitively):
//! - every generic instantiation edge, and
//! - every declared type parameter.
//!
//! Nodes are visited in preorder: a node, then its superclass subtree, then
//! each interface subtree in declaration order. Each node is visited once.
//! That order is also the precedence order for bindings: when a parameter is
//! bound along two paths, the edge visited first wins.
//!
//! ```text
//! Leaf extends Mid<Listener>          edges: Mid<Listener>, Base<Mid.X>,
//! Mid<X> extends Base<X>                     Delegate<Base.T>
//! Base<T> extends Delegate<T>
//!
//! bindings: Mid.X -> Listener, Base.T -> Listener, Delegate.M -> Listener
//! ```

use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use indexmap::IndexSet;
use redio_common::{DefId, HierarchyMetadata, Instantiation, ParamRef, TypeDescriptor};
use rustc_hash::{FxBuildHasher, FxHashSet};
use tracing::debug;

/// The expanded ancestry of one root type.
#[derive(Debug, Clone, Default)]
pub struct Ancestry {
    /// Visited nodes in preorder, root first.
    nodes: IndexSet<DefId, FxBuildHasher>,
    /// Generic instantiation edges in visit order.
    edges: Vec<Instantiation>,
    /// Declared parameters in visit order.
    params: Vec<ParamRef>,
    /// True when a limit cut the walk short.
    truncated: bool,
}

impl Ancestry {
    /// Expand the ancestry of `root`.
    pub fn expand(meta: &dyn HierarchyMetadata, root: DefId) -> Self {
        let mut ancestry = Self::default();
        let mut guard = RecursionGuard::with_profile(RecursionProfile::HierarchyWalk);
        ancestry.visit(meta, root, &mut guard);
        ancestry.truncated = guard.is_exceeded();
        debug!(
            root = %root,
            nodes = ancestry.nodes.len(),
            edges = ancestry.edges.len(),
            params = ancestry.params.len(),
            truncated = ancestry.truncated,
            "Ancestry::expand"
        );
        ancestry
    }

    fn visit(&mut self, meta: &dyn HierarchyMetadata, id: DefId, guard: &mut RecursionGuard<DefId>) {
        if self.nodes.contains(&id) {
            return;
        }
        let Some(node) = meta.node(id) else {
            return;
        };
        if !guard.enter(id).is_entered() {
            return;
        }

        self.nodes.insert(id);
        self.params
            .extend((0..node.type_params.len() as u32).map(|index| ParamRef::new(id, index)));
        self.edges
            .extend(node.supertypes().filter(|edge| edge.is_generic()).cloned());
        for edge in node.supertypes() {
            self.visit(meta, edge.raw, guard);
        }

        guard.leave(id);
    }

    pub fn nodes(&self) -> impl Iterator<Item = DefId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn contains(&self, id: DefId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn edges(&self) -> &[Instantiation] {
        &self.edges
    }

    pub fn params(&self) -> &[ParamRef] {
        &self.params
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Resolve every parameter that some edge binds, in precedence order.
    ///
    /// Parameters whose chain ends in an unbound parameter are left out.
    pub fn bindings(&self) -> Vec<(ParamRef, DefId)> {
        let declared: FxHashSet<ParamRef> = self.params.iter().copied().collect();
        let mut guard = RecursionGuard::with_profile(RecursionProfile::BindingChain);
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();

        for edge in &self.edges {
            for (index, arg) in edge.args.iter().enumerate() {
                let param = ParamRef::new(edge.raw, index as u32);
                if !declared.contains(&param) || seen.contains(&param) {
                    continue;
                }
                if let Some(concrete) = self.bind_argument(arg, &mut guard) {
                    seen.insert(param);
                    out.push((param, concrete));
                }
            }
        }
        out
    }

    /// Resolve a single parameter through the collected edges.
    pub fn bind(&self, param: ParamRef) -> Option<DefId> {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::BindingChain);
        self.follow(param, &mut guard)
    }

    /// Bind one argument position to a concrete type.
    ///
    /// A nested instantiation collapses to its raw type.
    fn bind_argument(&self, arg: &TypeDescriptor, guard: &mut RecursionGuard<ParamRef>) -> Option<DefId> {
        match arg {
            TypeDescriptor::Concrete(id) => Some(*id),
            TypeDescriptor::Instantiation(inst) => Some(inst.raw),
            TypeDescriptor::ParameterRef(param) => self.follow(*param, guard),
        }
    }

    /// Follow a parameter reference through the first edge that binds it
    /// to something resolvable.
    fn follow(&self, param: ParamRef, guard: &mut RecursionGuard<ParamRef>) -> Option<DefId> {
        match guard.enter(param) {
            RecursionResult::Entered => {}
            denied => {
                debug!(
                    owner = %param.owner,
                    index = param.index,
                    reason = ?denied,
                    "Ancestry::follow - chain abandoned"
                );
                return None;
            }
        }
        let bound = self
            .edges
            .iter()
            .filter(|edge| edge.raw == param.owner)
            .filter_map(|edge| edge.arg(param.index))
            .find_map(|arg| self.bind_argument(arg, guard));
        guard.leave(param);
        bound
    }
}

#[cfg(test)]
#[path = "../tests/ancestry_tests.rs"]
mod tests;
