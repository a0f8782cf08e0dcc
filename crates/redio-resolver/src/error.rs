use std::fmt;

/// Error returned when a selector's type parameter cannot be resolved.
///
/// Both variants describe static defects in the declared hierarchy, so
/// retrying the same resolution never helps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The selector type is not a direct, sole specialization of the
    /// resolver base.
    StructuralMisuse { self_type: String, base: String },
    /// The selected parameter is still unbound after expanding the provider.
    TypeResolution { target: String, provider: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructuralMisuse { self_type, base } => {
                write!(f, "`{self_type}` is not a direct specialization of `{base}`")
            }
            Self::TypeResolution { target, provider } => write!(
                f,
                "selected parameter `{target}` is not present or resolved in `{provider}`"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
