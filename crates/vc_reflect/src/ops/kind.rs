use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{List, Map, Scalar, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of the shape of a value.
///
/// Returned by [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Option(Option<&'a dyn Reflect>),
    /// The concrete value held by a polymorphic slot.
    Dynamic(&'a dyn Reflect),
    Scalar(Scalar<'a>),
}

impl ReflectRef<'_> {
    /// Returns the [`ReflectKind`] of this value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Option(_) => ReflectKind::Option,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Scalar(_) => ReflectKind::Scalar,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of the shape of a value.
///
/// Returned by [`Reflect::reflect_mut`]. Scalars carry no mutable view,
/// they are replaced through [`Reflect::set`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Option(Option<&'a mut dyn Reflect>),
    Dynamic(&'a mut dyn Reflect),
    Scalar,
}

impl ReflectMut<'_> {
    /// Returns the [`ReflectKind`] of this value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Option(_) => ReflectKind::Option,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Scalar => ReflectKind::Scalar,
        }
    }
}
