//! Common types shared by the redio crates.
//!
//! This crate provides the explicit type-hierarchy model that the resolver
//! walks and the delegate validates against:
//! - Definition identifiers and hierarchy nodes (`DefId`, `HierarchyNode`)
//! - Type usages (`TypeDescriptor`, `ParamRef`, `Instantiation`)
//! - The `HierarchyMetadata` query trait and its `HierarchyStore` backing
//! - JSON hierarchy declarations
//! - Centralized limits

// Definition identifiers, kinds and node metadata
pub mod def;
pub use def::{DefId, DefKind, HierarchyNode, MethodInfo, MethodKind};

// Type usages: concrete, parameter reference, instantiation
pub mod types;
pub use types::{Instantiation, ParamRef, TypeDescriptor};

// Hierarchy storage and the metadata query seam
pub mod store;
pub use store::{HierarchyMetadata, HierarchyStore};

// Declarative (JSON) hierarchy registration
pub mod declare;
pub use declare::{DeclarationError, HierarchyDeclaration, TypeDeclaration, TypeExpr};

// Centralized limits and thresholds
pub mod limits;
