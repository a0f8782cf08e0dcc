//! Generic parameter resolution over declared type hierarchies, and
//! multicast delegates built on it.
//!
//! | Crate | Provides |
//! |-------|----------|
//! | [`common`] | `DefId`, `HierarchyNode`, `HierarchyStore`, JSON declarations |
//! | [`resolver`] | `TypeGraphResolver`, `BindingTable`, recursion guards |
//! | [`delegate`] | `Delegate<M>`, `Shape`, `Callable`, `DelegateContext` |
//!
//! ```ignore
//! let store = Arc::new(HierarchyStore::new());
//! store.declare_json(DECLARATIONS)?;
//! let ctx = DelegateContext::new(store);
//! let mut listeners = Delegate::<OnEvent>::new(&ctx, listener_delegate)?;
//! listeners.add(Callable::new(|event: &Event| { ... }))?;
//! listeners.invoke().call(&event)?;
//! ```

pub use redio_common as common;
pub use redio_delegate as delegate;
pub use redio_resolver as resolver;

pub use redio_common::{
    DeclarationError, DefId, DefKind, HierarchyDeclaration, HierarchyMetadata, HierarchyNode,
    HierarchyStore, Instantiation, MethodInfo, MethodKind, ParamRef, TypeDescriptor,
};
pub use redio_delegate::{
    Callable, Delegate, DelegateContext, DelegateError, FunctionalShapeDescriptor, LiveList, Shape,
};
pub use redio_resolver::{BindingTable, ResolveError, TypeGraphResolver};

mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};
