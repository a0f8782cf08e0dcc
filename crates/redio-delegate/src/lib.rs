//! Multicast delegates over functional shapes.
//!
//! A delegate subclass names its shape through its type hierarchy:
//!
//! ```text
//! interface Listener { void on(Event e); }
//! class Delegate<M> { ... }
//! class ListenerDelegate extends Delegate<Listener> { }
//! ```
//!
//! [`Delegate::new`] resolves `Delegate.M` for the subclass, checks the result
//! is a functional interface, and gives back a delegate whose
//! [`invoke`](Delegate::invoke) callable runs every registered entry in order.
mod context;
mod delegate;
mod error;
mod functional;
mod shape;

pub use context::{DELEGATE_BASE_NAME, DelegateContext};
pub use delegate::Delegate;
pub use error::DelegateError;
pub use functional::FunctionalShapeDescriptor;
pub use shape::{Callable, LiveIter, LiveList, Shape};
