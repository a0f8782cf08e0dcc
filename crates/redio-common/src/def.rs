//! Definition identifiers and hierarchy node metadata.
//!
//! A `HierarchyNode` is everything the resolver needs to know about one
//! declared type: its kind, its declared type parameters, the instantiation
//! edge to its superclass and the instantiation edges to its interfaces.
//! Interfaces additionally carry their methods so a delegate can check that
//! a shape is functional.
//!
//! Nodes are plain data. They are registered in a
//! [`HierarchyStore`](crate::HierarchyStore), which hands out the `DefId`
//! that every edge refers to.

use crate::types::Instantiation;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

// =============================================================================
// DefId - Definition Identifier
// =============================================================================

/// Identity of a registered hierarchy node.
///
/// `DefId`s are allocated sequentially by a `HierarchyStore` and are only
/// meaningful within the store that allocated them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    /// Check if this `DefId` is valid.
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// DefKind / MethodInfo
// =============================================================================

/// Kind of hierarchy node.
///
/// | Kind | Superclass edge | Interface edges | Methods checked |
/// |------|-----------------|-----------------|-----------------|
/// | Class | at most one | any | no |
/// | Interface | none | super-interfaces | yes |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefKind {
    #[default]
    Class,
    Interface,
}

/// How a method is declared on an interface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// No body; implementors must provide it.
    #[default]
    Abstract,
    /// Has a default body.
    Default,
    /// Static; not part of the instance contract.
    Static,
}

/// A method declared on a hierarchy node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    #[serde(default)]
    pub arity: u8,
    #[serde(default)]
    pub kind: MethodKind,
}

impl MethodInfo {
    pub fn abstract_method(name: impl Into<String>, arity: u8) -> Self {
        Self {
            name: name.into(),
            arity,
            kind: MethodKind::Abstract,
        }
    }

    pub fn default_method(name: impl Into<String>, arity: u8) -> Self {
        Self {
            name: name.into(),
            arity,
            kind: MethodKind::Default,
        }
    }

    pub fn static_method(name: impl Into<String>, arity: u8) -> Self {
        Self {
            name: name.into(),
            arity,
            kind: MethodKind::Static,
        }
    }

    pub const fn is_abstract(&self) -> bool {
        matches!(self.kind, MethodKind::Abstract)
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

// =============================================================================
// HierarchyNode
// =============================================================================

/// Metadata for one declared type.
///
/// The `extends` and `implements` edges are instantiations of their target
/// type. A non-generic supertype is an instantiation with no arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyNode {
    /// Kind of node (affects which edges are meaningful)
    pub kind: DefKind,

    /// Name of the type (for diagnostics and lookups)
    pub name: String,

    /// Declared type parameter names, in declaration order
    pub type_params: SmallVec<[String; 2]>,

    /// Superclass edge
    pub extends: Option<Instantiation>,

    /// Interface edges, in declaration order
    pub implements: SmallVec<[Instantiation; 2]>,

    /// Declared methods
    pub methods: Vec<MethodInfo>,
}

impl HierarchyNode {
    fn new(kind: DefKind, name: String, type_params: &[&str]) -> Self {
        Self {
            kind,
            name,
            type_params: type_params.iter().map(|p| (*p).to_string()).collect(),
            extends: None,
            implements: SmallVec::new(),
            methods: Vec::new(),
        }
    }

    /// Create a new class node.
    pub fn class(name: impl Into<String>, type_params: &[&str]) -> Self {
        Self::new(DefKind::Class, name.into(), type_params)
    }

    /// Create a new interface node.
    pub fn interface(name: impl Into<String>, type_params: &[&str]) -> Self {
        Self::new(DefKind::Interface, name.into(), type_params)
    }

    /// Set the superclass edge.
    pub fn with_extends(mut self, parent: Instantiation) -> Self {
        self.extends = Some(parent);
        self
    }

    /// Set implemented interfaces.
    pub fn with_implements(mut self, interfaces: Vec<Instantiation>) -> Self {
        self.implements = interfaces.into();
        self
    }

    /// Append one implemented interface.
    pub fn implementing(mut self, interface: Instantiation) -> Self {
        self.implements.push(interface);
        self
    }

    /// Append a declared method.
    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, DefKind::Interface)
    }

    /// Name of the type parameter at `index`.
    pub fn type_param(&self, index: u32) -> Option<&str> {
        self.type_params.get(index as usize).map(String::as_str)
    }

    /// All supertype edges: superclass first, then interfaces in order.
    pub fn supertypes(&self) -> impl Iterator<Item = &Instantiation> {
        self.extends.iter().chain(self.implements.iter())
    }
}
