//! Containers for static storage of type information.
//!
//! ## NonGenericTypeInfoCell
//!
//! For non generic types, [`NonGenericTypeInfoCell`] wraps a [`OnceLock`].
//!
//! ## GenericTypeCell
//!
//! If the type is generic, the `static CELL` inside the function is shared
//! by every instantiation, so the inner is a [`TypeIdMap`] wrapped in a
//! [`RwLock`]:
//!
//! - [`GenericTypeInfoCell`]: Storage [`TypeInfo`]
//! - [`GenericTypePathCell`]: Storage [`String`]

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::{TypeIdMap, new_map};
use crate::info::TypeInfo;

mod sealed {
    use crate::info::TypeInfo;

    pub trait TypedProperty: Send + Sync + 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

/// Container for static storage of non-generic type information.
///
/// ## Example
///
/// ```
/// use vc_reflect::impls::NonGenericTypeInfoCell;
/// use vc_reflect::info::{ScalarInfo, ScalarKind, TypeInfo, TypePath, Typed};
///
/// struct Meters(f32);
///
/// impl TypePath for Meters {
///     fn type_path() -> &'static str { "units::Meters" }
///     fn type_name() -> &'static str { "Meters" }
/// }
///
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::Float, |_| None)))
///     }
/// }
///
/// assert_eq!(Meters::type_info().type_name(), "Meters");
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the info stored in the cell.
    ///
    /// If the cell is empty, it is filled from the given function.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

/// Container for static storage of type information with generics.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`].
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Container for static storage of [`TypeInfo`] with generics.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Container for static storage of type paths with generics.
///
/// ## Example
///
/// ```
/// use vc_reflect::impls::{self, GenericTypePathCell};
/// use vc_reflect::info::TypePath;
///
/// struct Handle<T>(T);
///
/// impl<T: TypePath> TypePath for Handle<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["assets::Handle<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["Handle<", T::type_name(), ">"]))
///     }
/// }
///
/// assert_eq!(<Handle<u8>>::type_path(), "assets::Handle<u8>");
/// assert_eq!(<Handle<bool>>::type_name(), "Handle<bool>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(new_map()))
    }

    /// Returns the value stored for type `G`.
    ///
    /// If there is no entry found, a new one will be generated from the given function.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *table
            .entry(type_id)
            .or_insert_with(|| &*Box::leak(Box::new(value)))
    }
}
