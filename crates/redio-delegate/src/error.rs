use redio_resolver::ResolveError;
use std::fmt;

/// Error returned when a delegate cannot be constructed or mutated.
///
/// Errors raised by entries during an aggregate call are not wrapped here;
/// they surface as the shape's own error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateError {
    /// The shape type could not be resolved from the delegate's hierarchy.
    Resolve(ResolveError),
    /// No type is registered under the shape's interface name.
    UnknownShape { shape: &'static str },
    /// The shape is not an interface with exactly one abstract method.
    NotFunctionalShape {
        shape: String,
        abstract_methods: usize,
    },
    /// The resolved interface is not the one the Rust shape stands for.
    ShapeMismatch {
        expected: &'static str,
        found: String,
    },
    /// An absent entry was passed to `add`.
    NullArgument,
}

impl fmt::Display for DelegateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve(err) => write!(f, "cannot resolve delegate shape: {err}"),
            Self::UnknownShape { shape } => {
                write!(f, "no interface named `{shape}` is registered")
            }
            Self::NotFunctionalShape {
                shape,
                abstract_methods,
            } => write!(
                f,
                "`{shape}` is not functional: expected an interface with 1 abstract method, found {abstract_methods}"
            ),
            Self::ShapeMismatch { expected, found } => {
                write!(f, "delegate shape resolved to `{found}`, expected `{expected}`")
            }
            Self::NullArgument => write!(f, "cannot add an absent entry to a delegate"),
        }
    }
}

impl std::error::Error for DelegateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResolveError> for DelegateError {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}
