//! Functional-shape validation.
//!
//! An interface is functional when exactly one abstract method remains after
//! merging its own declarations with those inherited from super-interfaces.
//! Methods are keyed by `(name, arity)`; the declaration nearest to the
//! interface wins, so a `default` re-declaration discharges an inherited
//! abstract method. Static methods are not inherited and never count.

use crate::error::DelegateError;
use redio_common::{DefId, HierarchyMetadata, MethodInfo, MethodKind};
use redio_resolver::{RecursionGuard, RecursionProfile};
use rustc_hash::FxHashSet;
use std::fmt;

/// Proof that an interface has exactly one abstract method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionalShapeDescriptor {
    interface: DefId,
    name: String,
    method: MethodInfo,
}

impl FunctionalShapeDescriptor {
    /// Validate `interface` as a functional shape.
    pub fn of(meta: &dyn HierarchyMetadata, interface: DefId) -> Result<Self, DelegateError> {
        let node = meta
            .node(interface)
            .filter(|node| node.is_interface())
            .ok_or_else(|| DelegateError::NotFunctionalShape {
                shape: meta.display_name(interface),
                abstract_methods: 0,
            })?;

        let mut abstract_methods = abstract_methods(meta, interface);
        if abstract_methods.len() != 1 {
            return Err(DelegateError::NotFunctionalShape {
                shape: node.name,
                abstract_methods: abstract_methods.len(),
            });
        }
        Ok(Self {
            interface,
            name: node.name,
            method: abstract_methods.remove(0),
        })
    }

    pub fn interface(&self) -> DefId {
        self.interface
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The single abstract method.
    pub fn method(&self) -> &MethodInfo {
        &self.method
    }

    pub fn arity(&self) -> u8 {
        self.method.arity
    }
}

impl fmt::Display for FunctionalShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.name, self.method)
    }
}

/// Abstract methods of `interface` after inheritance, in discovery order.
fn abstract_methods(meta: &dyn HierarchyMetadata, interface: DefId) -> Vec<MethodInfo> {
    let mut seen = FxHashSet::default();
    let mut nearest = Vec::new();
    let mut guard = RecursionGuard::with_profile(RecursionProfile::InterfaceMethods);
    collect_methods(meta, interface, &mut seen, &mut nearest, &mut guard);
    nearest.into_iter().filter(MethodInfo::is_abstract).collect()
}

/// Record the nearest declaration of every `(name, arity)` pair.
fn collect_methods(
    meta: &dyn HierarchyMetadata,
    id: DefId,
    seen: &mut FxHashSet<(String, u8)>,
    nearest: &mut Vec<MethodInfo>,
    guard: &mut RecursionGuard<DefId>,
) {
    let _ = guard.scope(id, |guard| {
        for method in meta.methods(id) {
            if method.kind == MethodKind::Static {
                continue;
            }
            if seen.insert((method.name.clone(), method.arity)) {
                nearest.push(method);
            }
        }
        for parent in meta.implements(id) {
            collect_methods(meta, parent.raw, seen, nearest, guard);
        }
    });
}

#[cfg(test)]
#[path = "../tests/functional_tests.rs"]
mod tests;
