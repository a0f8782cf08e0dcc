//! Functional shapes and the callables that implement them.
//!
//! A [`Shape`] is the Rust-side signature of a functional interface:
//! argument type, output type, error type, and the interface name it stands
//! for in the hierarchy store. A [`Callable`] is a shared reference to one
//! function of that shape.
//!
//! `Shape::aggregate` builds the single callable that forwards one call to
//! every entry of a delegate. The default implementation is a generic loop;
//! a shape can override it with a hand-written one.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The signature of a functional interface.
///
/// ```ignore
/// struct OnEvent;
///
/// impl Shape for OnEvent {
///     const INTERFACE: &'static str = "Listener";
///     type Args = (u32, String);
///     type Output = ();
///     type Error = std::convert::Infallible;
/// }
/// ```
pub trait Shape: Sized + 'static {
    /// Name of the interface in the hierarchy store.
    const INTERFACE: &'static str;

    type Args: ?Sized;

    /// Result of one call. `Default::default()` is what an empty delegate
    /// returns.
    type Output: Default;

    type Error;

    /// Build the aggregate callable over a delegate's live entries.
    ///
    /// The default calls every entry in order with the same arguments and
    /// returns the last result. The first error stops the loop and is
    /// returned unchanged.
    fn aggregate(entries: LiveList<Self>) -> Callable<Self> {
        Callable::new(move |args: &Self::Args| {
            let mut result = Self::Output::default();
            for entry in entries.iter() {
                result = entry.call(args)?;
            }
            Ok(result)
        })
    }
}

// =============================================================================
// Callable
// =============================================================================

type CallableFn<M> =
    dyn Fn(&<M as Shape>::Args) -> Result<<M as Shape>::Output, <M as Shape>::Error>;

/// A shared reference to one function of shape `M`.
///
/// Cloning shares the function. Equality and hashing are by identity: two
/// clones of one `Callable` are equal, two separately created callables are
/// not, even when they wrap the same function.
pub struct Callable<M: Shape> {
    func: Rc<CallableFn<M>>,
}

impl<M: Shape> Callable<M> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&M::Args) -> Result<M::Output, M::Error> + 'static,
    {
        Self {
            func: Rc::new(func),
        }
    }

    #[inline]
    pub fn call(&self, args: &M::Args) -> Result<M::Output, M::Error> {
        (self.func)(args)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.func).cast::<()>()
    }
}

impl<M: Shape> Clone for Callable<M> {
    fn clone(&self) -> Self {
        Self {
            func: Rc::clone(&self.func),
        }
    }
}

impl<M: Shape> PartialEq for Callable<M> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl<M: Shape> Eq for Callable<M> {}

impl<M: Shape> Hash for Callable<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<M: Shape> fmt::Debug for Callable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable<{}>({:p})", M::INTERFACE, self.addr())
    }
}

// =============================================================================
// LiveList
// =============================================================================

/// A handle on a delegate's entry list that always sees its current contents.
///
/// Iteration reads one position at a time and never holds a borrow across
/// an entry call, so entries added or removed by a running call are picked
/// up (or skipped) at the next position.
pub struct LiveList<M: Shape> {
    entries: Rc<RefCell<Vec<Callable<M>>>>,
}

impl<M: Shape> LiveList<M> {
    pub(crate) fn new(entries: Rc<RefCell<Vec<Callable<M>>>>) -> Self {
        Self { entries }
    }

    /// Entry at `index` right now.
    pub fn get(&self, index: usize) -> Option<Callable<M>> {
        self.entries.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn iter(&self) -> LiveIter<'_, M> {
        LiveIter {
            list: self,
            position: 0,
        }
    }
}

impl<M: Shape> Clone for LiveList<M> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

/// Iterator over a [`LiveList`] by position.
pub struct LiveIter<'a, M: Shape> {
    list: &'a LiveList<M>,
    position: usize,
}

impl<M: Shape> Iterator for LiveIter<'_, M> {
    type Item = Callable<M>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.position)?;
        self.position += 1;
        Some(entry)
    }
}
