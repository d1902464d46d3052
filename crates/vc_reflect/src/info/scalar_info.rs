use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypePath};
use crate::ops::Scalar;

/// Converts a leaf node value, `None` if it does not fit the type.
pub type FromScalar = fn(value: Scalar<'_>) -> Option<Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// ScalarKind

/// The leaf category of a scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    UInt,
    Float,
    Char,
    String,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.pad("boolean"),
            Self::Int => f.pad("signed integer"),
            Self::UInt => f.pad("unsigned integer"),
            Self::Float => f.pad("float"),
            Self::Char => f.pad("character"),
            Self::String => f.pad("string"),
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type information of a leaf value.
#[derive(Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
    from_scalar: FromScalar,
}

impl ScalarInfo {
    pub fn new<T: TypePath>(kind: ScalarKind, from_scalar: FromScalar) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            from_scalar,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// See [`FromScalar`].
    #[inline]
    pub fn from_scalar(&self, value: Scalar<'_>) -> Option<Box<dyn Reflect>> {
        (self.from_scalar)(value)
    }
}
