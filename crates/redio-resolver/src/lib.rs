//! Generic parameter resolution over declared type hierarchies.
//!
//! Given a selector type `S extends Selector<X>` and a provider type whose
//! ancestry binds `X`, [`TypeGraphResolver::resolve`] returns the concrete
//! type `X` stands for. Bindings found along the way are remembered, per
//! provider, in a [`BindingTable`] owned by the resolver.
//!
//! - Single-level bindings resolve without touching the provider.
//! - Multi-level bindings are followed through abstract intermediate
//!   classes and interfaces.
//! - Nested instantiations collapse to their raw type.
//! - Unbound parameters fail with [`ResolveError::TypeResolution`].
mod ancestry;
mod binding;
mod error;
pub mod recursion;
mod resolver;

pub use ancestry::Ancestry;
pub use binding::BindingTable;
pub use error::ResolveError;
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use resolver::{SELECTOR_BASE_NAME, TypeGraphResolver};
