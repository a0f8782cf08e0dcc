//! Type usages.
//!
//! A `TypeDescriptor` is how a type appears in a supertype edge or as a
//! type argument: a concrete type, a reference to a declared parameter, or a
//! parameterized instantiation.

use crate::def::DefId;

/// Identity of a declared type parameter: the declaring type and the
/// parameter's position in its declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamRef {
    pub owner: DefId,
    pub index: u32,
}

impl ParamRef {
    pub const fn new(owner: DefId, index: u32) -> Self {
        Self { owner, index }
    }
}

/// A generic type applied to arguments, e.g. `Base<String, T>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instantiation {
    pub raw: DefId,
    pub args: Vec<TypeDescriptor>,
}

impl Instantiation {
    pub fn new(raw: DefId, args: Vec<TypeDescriptor>) -> Self {
        Self { raw, args }
    }

    /// A supertype edge without type arguments.
    pub fn plain(raw: DefId) -> Self {
        Self {
            raw,
            args: Vec::new(),
        }
    }

    pub fn arg(&self, index: u32) -> Option<&TypeDescriptor> {
        self.args.get(index as usize)
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }
}

/// Neutral representation of a type usage.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A concrete, non-parameterized type.
    Concrete(DefId),
    /// A reference to a type parameter declared by some type.
    ParameterRef(ParamRef),
    /// A generic type applied to arguments.
    Instantiation(Instantiation),
}

impl TypeDescriptor {
    pub const fn concrete(id: DefId) -> Self {
        Self::Concrete(id)
    }

    pub const fn param(owner: DefId, index: u32) -> Self {
        Self::ParameterRef(ParamRef::new(owner, index))
    }

    pub fn applied(raw: DefId, args: Vec<TypeDescriptor>) -> Self {
        Self::Instantiation(Instantiation::new(raw, args))
    }

    pub const fn as_param(&self) -> Option<ParamRef> {
        match self {
            Self::ParameterRef(param) => Some(*param),
            _ => None,
        }
    }

    /// The concrete origin of this usage without looking anything up.
    ///
    /// An instantiation collapses to its raw type, so `List<T>` yields `List`.
    /// Parameter references have no origin on their own.
    pub const fn origin(&self) -> Option<DefId> {
        match self {
            Self::Concrete(id) => Some(*id),
            Self::Instantiation(inst) => Some(inst.raw),
            Self::ParameterRef(_) => None,
        }
    }
}

impl From<DefId> for TypeDescriptor {
    fn from(id: DefId) -> Self {
        Self::Concrete(id)
    }
}

impl From<ParamRef> for TypeDescriptor {
    fn from(param: ParamRef) -> Self {
        Self::ParameterRef(param)
    }
}

impl From<Instantiation> for TypeDescriptor {
    fn from(inst: Instantiation) -> Self {
        Self::Instantiation(inst)
    }
}
