use core::any::TypeId;
use core::fmt;

use crate::info::{DynamicInfo, ListInfo, MapInfo, OptionInfo, ScalarInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected type, see [`TypeInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Map,
    Option,
    Dynamic,
    Scalar,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Option => f.pad("Option"),
            Self::Dynamic => f.pad("Dynamic"),
            Self::Scalar => f.pad("Scalar"),
        }
    }
}

/// Returned by the `as_xxx` accessors of [`TypeInfo`].
#[derive(thiserror::Error, Debug)]
#[error("reflect kind mismatch: expected {expected}, received {received}")]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a reflected type.
///
/// Built once per type and cached in a static cell, this is the schema
/// descriptor the serializer walks.
///
/// - [`StructInfo`]: named members, fields or accessor-backed properties.
/// - [`ListInfo`]: ordered sequences such as `Vec<T>`.
/// - [`MapInfo`]: string keyed maps.
/// - [`OptionInfo`]: `Option<T>`, a `null` node when empty.
/// - [`DynamicInfo`]: polymorphic slots such as `Box<dyn Animal>`.
/// - [`ScalarInfo`]: numbers, booleans, characters and strings.
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Map(MapInfo),
    Option(OptionInfo),
    Dynamic(DynamicInfo),
    Scalar(ScalarInfo),
}

macro_rules! impl_as_fn {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`], or an error for other kinds.")]
        #[inline]
        pub fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    /// Returns the [`Type`] of the described type.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Option(info) => info.ty(),
            Self::Dynamic(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    #[inline]
    pub const fn module(&self) -> &'static str {
        self.ty().module()
    }

    /// Returns the [`ReflectKind`] of the described type.
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

    impl_as_fn!(as_struct: Struct => StructInfo);
    impl_as_fn!(as_list: List => ListInfo);
    impl_as_fn!(as_map: Map => MapInfo);
    impl_as_fn!(as_option: Option => OptionInfo);
    impl_as_fn!(as_dynamic: Dynamic => DynamicInfo);
    impl_as_fn!(as_scalar: Scalar => ScalarInfo);
}
