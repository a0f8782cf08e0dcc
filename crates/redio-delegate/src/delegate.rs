//! Multicast delegates.
//!
//! A `Delegate<M>` holds an ordered list of [`Callable<M>`] entries and hands
//! out one aggregate callable that forwards a call to all of them.
//!
//! The functional shape is fixed at construction. Three ways to get it:
//!
//! | Constructor | Shape source | Resolver used |
//! |-------------|--------------|---------------|
//! | [`Delegate::new`] | the subclass's ancestry binding of `Delegate.M` | yes |
//! | [`Delegate::with_shape`] | an explicit interface `DefId` | no |
//! | [`Delegate::with_declared_shape`] | the store entry named `M::INTERFACE` | no |
//!
//! The aggregate is built on the first [`invoke`](Delegate::invoke) and kept
//! for the lifetime of the delegate. It reads the live entry list on every
//! call, so mutations made after it was built are visible to it.
//!
//! Delegates are single-threaded: the list is shared through `Rc<RefCell<_>>`
//! between the delegate and its aggregate. Mutating the list from inside an
//! entry while an aggregate call is running is allowed but the interleaving
//! is unspecified.

use crate::context::DelegateContext;
use crate::error::DelegateError;
use crate::functional::FunctionalShapeDescriptor;
use crate::shape::{Callable, LiveList, Shape};
use redio_common::{DefId, HierarchyMetadata};
use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tracing::{debug, trace};

pub struct Delegate<M: Shape> {
    entries: Rc<RefCell<Vec<Callable<M>>>>,
    shape: Rc<FunctionalShapeDescriptor>,
    aggregate: OnceCell<Callable<M>>,
}

impl<M: Shape> Delegate<M> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a delegate whose shape is resolved from `subclass`'s hierarchy.
    ///
    /// `subclass` must bind `Delegate.M`, directly or through any number of
    /// intermediate classes and interfaces.
    pub fn new(ctx: &DelegateContext, subclass: DefId) -> Result<Self, DelegateError> {
        let resolved = ctx.resolver().resolve(ctx.selector(), subclass)?;
        debug!(
            subclass = %ctx.store().display_name(subclass),
            resolved = %ctx.store().display_name(resolved),
            "Delegate::new"
        );
        Self::bound(ctx, resolved)
    }

    /// Create a delegate with an explicit shape, skipping resolution.
    pub fn with_shape(ctx: &DelegateContext, interface: DefId) -> Result<Self, DelegateError> {
        Self::bound(ctx, interface)
    }

    /// Create a delegate whose shape is the interface named `M::INTERFACE`.
    pub fn with_declared_shape(ctx: &DelegateContext) -> Result<Self, DelegateError> {
        let interface = ctx
            .store()
            .lookup(M::INTERFACE)
            .ok_or(DelegateError::UnknownShape {
                shape: M::INTERFACE,
            })?;
        Self::bound(ctx, interface)
    }

    fn bound(ctx: &DelegateContext, interface: DefId) -> Result<Self, DelegateError> {
        let shape = FunctionalShapeDescriptor::of(ctx.store().as_ref(), interface)?;
        if shape.name() != M::INTERFACE {
            return Err(DelegateError::ShapeMismatch {
                expected: M::INTERFACE,
                found: shape.name().to_string(),
            });
        }
        Ok(Self {
            entries: Rc::new(RefCell::new(Vec::new())),
            shape: Rc::new(shape),
            aggregate: OnceCell::new(),
        })
    }

    // =========================================================================
    // Invocation list
    // =========================================================================

    /// Append an entry.
    ///
    /// Accepts a `Callable` or an `Option<Callable>`; `None` is rejected.
    pub fn add(&mut self, entry: impl Into<Option<Callable<M>>>) -> Result<(), DelegateError> {
        let entry = entry.into().ok_or(DelegateError::NullArgument)?;
        self.entries.borrow_mut().push(entry);
        trace!(shape = %self.shape, len = self.len(), "Delegate::add");
        Ok(())
    }

    /// Remove the first occurrence of `entry`. Returns whether one was found.
    pub fn remove(&mut self, entry: &Callable<M>) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|e| e == entry) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Keep only the entries matching `predicate`, preserving their order.
    pub fn filter(&mut self, mut predicate: impl FnMut(&Callable<M>) -> bool) {
        self.entries.borrow_mut().retain(|e| predicate(e));
    }

    /// Copy of the current entries.
    pub fn snapshot(&self) -> Vec<Callable<M>> {
        self.entries.borrow().clone()
    }

    /// Replace all entries.
    pub fn set_invocation_list(&mut self, entries: impl IntoIterator<Item = Callable<M>>) {
        let replacement: Vec<Callable<M>> = entries.into_iter().collect();
        *self.entries.borrow_mut() = replacement;
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    // =========================================================================
    // Aggregate
    // =========================================================================

    /// The callable forwarding one call to every entry.
    ///
    /// Built on first use by [`Shape::aggregate`] and reused afterwards.
    pub fn invoke(&self) -> Callable<M> {
        self.aggregate
            .get_or_init(|| {
                debug!(shape = %self.shape, "Delegate::invoke - building aggregate");
                M::aggregate(LiveList::new(Rc::clone(&self.entries)))
            })
            .clone()
    }

    /// Whether the aggregate has been built.
    pub fn is_built(&self) -> bool {
        self.aggregate.get().is_some()
    }

    pub fn shape(&self) -> &FunctionalShapeDescriptor {
        &self.shape
    }
}

/// Copies the current entries into a new list with an unbuilt aggregate.
impl<M: Shape> Clone for Delegate<M> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::new(RefCell::new(self.snapshot())),
            shape: Rc::clone(&self.shape),
            aggregate: OnceCell::new(),
        }
    }
}

impl<M: Shape> PartialEq for Delegate<M> {
    fn eq(&self, other: &Self) -> bool {
        self.shape.interface() == other.shape.interface()
            && *self.entries.borrow() == *other.entries.borrow()
    }
}

impl<M: Shape> Eq for Delegate<M> {}

impl<M: Shape> Hash for Delegate<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.borrow().hash(state);
        self.shape.interface().hash(state);
    }
}

impl<M: Shape> fmt::Debug for Delegate<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("shape", &self.shape)
            .field("entries", &*self.entries.borrow())
            .field("built", &self.is_built())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/delegate_tests.rs"]
mod tests;
