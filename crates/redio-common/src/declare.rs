//! Declarative hierarchy registration.
//!
//! A `HierarchyDeclaration` describes a batch of types in JSON:
//!
//! ```json
//! { "types": [
//!   { "name": "Listener", "kind": "interface",
//!     "methods": [ { "name": "on_event", "arity": 2 } ] },
//!   { "name": "Base", "params": ["X"],
//!     "extends": { "type": "Delegate", "args": ["X"] } },
//!   { "name": "Leaf", "extends": { "type": "Base", "args": ["Listener"] } }
//! ] }
//! ```
//!
//! A type expression is either a bare name or `{ "type", "args" }`. A bare
//! name resolves to a parameter of the declaring type first, then to a type
//! declared in the same batch, then to a type already in the store. Types in
//! one batch may refer to each other in any order.
//!
//! Interfaces list their super-interfaces under `implements`.
//!
//! Registration is all-or-nothing: every expression is lowered before any
//! node is inserted.

use crate::def::{DefId, DefKind, HierarchyNode, MethodInfo};
use crate::store::{HierarchyMetadata, HierarchyStore};
use crate::types::{Instantiation, TypeDescriptor};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A batch of type declarations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyDeclaration {
    pub types: Vec<TypeDeclaration>,
}

/// One declared type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default)]
    pub kind: DefKind,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<TypeExpr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<TypeExpr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodInfo>,
}

/// A type usage as written in a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    Name(String),
    Applied {
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        args: Vec<TypeExpr>,
    },
}

/// Error returned when a declaration batch cannot be registered.
#[derive(Debug)]
pub enum DeclarationError {
    /// The document is not valid declaration JSON.
    Json(serde_json::Error),
    /// A name is declared twice, or is already registered in the store.
    DuplicateType { name: String },
    /// A referenced name is neither a parameter nor a known type.
    UnknownType { name: String, in_type: String },
    /// A type is applied to the wrong number of arguments.
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        in_type: String,
    },
    /// A type parameter is used as a supertype.
    ParameterAsSupertype { param: String, in_type: String },
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid hierarchy declaration: {err}"),
            Self::DuplicateType { name } => write!(f, "type `{name}` is declared more than once"),
            Self::UnknownType { name, in_type } => {
                write!(f, "unknown type `{name}` referenced by `{in_type}`")
            }
            Self::ArityMismatch {
                name,
                expected,
                found,
                in_type,
            } => write!(
                f,
                "`{name}` expects {expected} type argument(s) but `{in_type}` supplies {found}"
            ),
            Self::ParameterAsSupertype { param, in_type } => {
                write!(f, "type parameter `{param}` cannot be a supertype of `{in_type}`")
            }
        }
    }
}

impl std::error::Error for DeclarationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DeclarationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl HierarchyDeclaration {
    pub fn from_json(source: &str) -> Result<Self, DeclarationError> {
        Ok(serde_json::from_str(source)?)
    }
}

// =============================================================================
// Lowering
// =============================================================================

/// Names visible while lowering one batch.
struct Scope<'a> {
    store: &'a HierarchyStore,
    /// Batch-local name -> (id, declared parameter count)
    batch: FxHashMap<&'a str, (DefId, usize)>,
}

impl<'a> Scope<'a> {
    fn resolve(&self, name: &str, in_type: &str) -> Result<(DefId, usize), DeclarationError> {
        if let Some(found) = self.batch.get(name) {
            return Ok(*found);
        }
        self.store
            .lookup(name)
            .map(|id| (id, self.store.type_params(id).len()))
            .ok_or_else(|| DeclarationError::UnknownType {
                name: name.to_string(),
                in_type: in_type.to_string(),
            })
    }

    fn lower_expr(&self, expr: &TypeExpr, owner: DefId, decl: &TypeDeclaration) -> Result<TypeDescriptor, DeclarationError> {
        match expr {
            TypeExpr::Name(name) => {
                if let Some(index) = decl.params.iter().position(|p| p == name) {
                    return Ok(TypeDescriptor::param(owner, index as u32));
                }
                let (id, _) = self.resolve(name, &decl.name)?;
                Ok(TypeDescriptor::Concrete(id))
            }
            TypeExpr::Applied { ty, args } if args.is_empty() => {
                self.lower_expr(&TypeExpr::Name(ty.clone()), owner, decl)
            }
            TypeExpr::Applied { .. } => Ok(TypeDescriptor::Instantiation(
                self.lower_edge(expr, owner, decl)?,
            )),
        }
    }

    fn lower_edge(&self, expr: &TypeExpr, owner: DefId, decl: &TypeDeclaration) -> Result<Instantiation, DeclarationError> {
        let (ty, args) = match expr {
            TypeExpr::Name(name) => (name, &[][..]),
            TypeExpr::Applied { ty, args } => (ty, args.as_slice()),
        };
        if decl.params.iter().any(|p| p == ty) {
            return Err(DeclarationError::ParameterAsSupertype {
                param: ty.clone(),
                in_type: decl.name.clone(),
            });
        }
        let (raw, arity) = self.resolve(ty, &decl.name)?;
        if !args.is_empty() && args.len() != arity {
            return Err(DeclarationError::ArityMismatch {
                name: ty.clone(),
                expected: arity,
                found: args.len(),
                in_type: decl.name.clone(),
            });
        }
        let args = args
            .iter()
            .map(|arg| self.lower_expr(arg, owner, decl))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Instantiation::new(raw, args))
    }
}

impl Scope<'_> {
    /// Lower every type of the batch under the ids currently in scope.
    fn lower_all(&self, decl: &HierarchyDeclaration) -> Result<Vec<(DefId, HierarchyNode)>, DeclarationError> {
        let mut lowered = Vec::with_capacity(decl.types.len());
        for ty in &decl.types {
            let (id, _) = self.batch[ty.name.as_str()];
            let params: Vec<&str> = ty.params.iter().map(String::as_str).collect();
            let mut node = match ty.kind {
                DefKind::Class => HierarchyNode::class(ty.name.clone(), &params),
                DefKind::Interface => HierarchyNode::interface(ty.name.clone(), &params),
            };
            if let Some(parent) = &ty.extends {
                node.extends = Some(self.lower_edge(parent, id, ty)?);
            }
            for iface in &ty.implements {
                node.implements.push(self.lower_edge(iface, id, ty)?);
            }
            node.methods = ty.methods.clone();
            lowered.push((id, node));
        }
        Ok(lowered)
    }
}

impl HierarchyStore {
    /// Register every type of a declaration batch.
    ///
    /// The batch is checked in full before any id is allocated, so a
    /// rejected batch leaves the store and its id sequence untouched.
    /// Returns the new ids in declaration order.
    pub fn declare(&self, decl: &HierarchyDeclaration) -> Result<Vec<DefId>, DeclarationError> {
        let mut scope = Scope {
            store: self,
            batch: FxHashMap::default(),
        };
        for ty in &decl.types {
            if self.contains_name(&ty.name) || scope.batch.contains_key(ty.name.as_str()) {
                return Err(DeclarationError::DuplicateType {
                    name: ty.name.clone(),
                });
            }
            scope
                .batch
                .insert(ty.name.as_str(), (DefId::INVALID, ty.params.len()));
        }

        // Lowering errors never depend on id values.
        scope.lower_all(decl)?;

        for ty in &decl.types {
            let id = self.allocate();
            if let Some(slot) = scope.batch.get_mut(ty.name.as_str()) {
                slot.0 = id;
            }
        }
        let lowered = scope.lower_all(decl)?;

        debug!(count = lowered.len(), "HierarchyStore::declare");
        Ok(lowered
            .into_iter()
            .map(|(id, node)| {
                self.insert(id, node);
                id
            })
            .collect())
    }

    /// Parse and register a JSON declaration batch.
    pub fn declare_json(&self, source: &str) -> Result<Vec<DefId>, DeclarationError> {
        let decl = HierarchyDeclaration::from_json(source)?;
        self.declare(&decl)
    }
}

#[cfg(test)]
#[path = "../tests/declare_tests.rs"]
mod tests;
