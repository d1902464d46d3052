use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use crate::hash::{TypeIdMap, new_map};
use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for type metadata, registered into the [`TypeRegistry`].
///
/// This includes a [`TypeInfo`] and a [`TypeTrait`] table.
///
/// An instance of `TypeMeta` can be created using the [`TypeMeta::of`]
/// method, but is more often automatically generated using
/// [`#[derive(Reflect)]`](crate::derive::Reflect), which generates
/// an implementation of the [`GetTypeMeta`] trait.
///
/// # Example
///
/// ```
/// # use vc_reflect::registry::{TypeMeta, TypeTraitDefault, FromType};
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());
///
/// let f = meta.get_trait::<TypeTraitDefault>().unwrap();
/// let s = f.default().take::<String>().unwrap();
///
/// assert_eq!(s, "");
/// ```
pub struct TypeMeta {
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Create a empty [`TypeMeta`] from a type.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            type_info: T::type_info(),
            trait_table: new_map(),
        }
    }

    /// Create a empty [`TypeMeta`] from a type with capacity.
    #[inline]
    pub fn with_capacity<T: Typed>(capacity: usize) -> Self {
        let mut trait_table = new_map();
        trait_table.reserve(capacity);
        Self {
            type_info: T::type_info(),
            trait_table,
        }
    }

    /// Returns the [`TypeInfo`] .
    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// Returns the [`Type`] .
    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.type_info.ty()
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
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

    /// The module qualifier of the type, see [`TypePath::module_qualifier`].
    ///
    /// [`TypePath::module_qualifier`]: crate::info::TypePath::module_qualifier
    #[inline]
    pub const fn module(&self) -> &'static str {
        self.ty().module()
    }

    /// Insert a new [`TypeTrait`].
    #[inline]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    /// Returns the [`TypeTrait`] of type `T`, if present.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.get_trait_by_id(TypeId::of::<T>())
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    pub fn get_trait_by_id(&self, type_id: TypeId) -> Option<&dyn TypeTrait> {
        self.trait_table.get(&type_id).map(Deref::deref)
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.has_trait_by_id(TypeId::of::<T>())
    }

    pub fn has_trait_by_id(&self, type_id: TypeId) -> bool {
        self.trait_table.contains_key(&type_id)
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("module", &self.module())
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`]
/// for registration into the [`TypeRegistry`].
///
/// This trait is automatically implemented for items using [`#[derive(Reflect)]`](crate::derive::Reflect).
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot provide type registration information",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait GetTypeMeta: Typed {
    /// Returns the default [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type, the declared member types.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
