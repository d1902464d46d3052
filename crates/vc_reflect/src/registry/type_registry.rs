use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::hash::{HashMap, TypeIdMap, new_map};
use crate::info::{TypeInfo, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of [reflected] types.
///
/// This struct is the central store of type information, and the table
/// the type resolver searches when it turns a type hint back into a type.
/// [Registering] a type generates a new [`TypeMeta`] entry using the type's
/// [`GetTypeMeta`] implementation (which is automatically implemented when
/// using [`#[derive(Reflect)]`](crate::derive::Reflect)).
///
/// Types are kept in registration order, every lookup that may return
/// several candidates reports them in that order.
///
/// # Example
///
/// ```
/// use vc_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
///
/// let generator = registry
///     .get_with_type_path("alloc::string::String").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let s = generator.default().take::<String>().unwrap();
/// assert_eq!(s, "");
/// ```
///
/// [reflected]: crate
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    registration_order: Vec<TypeId>,
    type_path_to_id: HashMap<&'static str, Vec<TypeId>>,
    type_name_to_id: HashMap<&'static str, Vec<TypeId>>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: new_map(),
            registration_order: Vec::new(),
            type_path_to_id: new_map(),
            type_name_to_id: new_map(),
        }
    }

    /// Create a type registry with default registrations for primitive types.
    ///
    /// - `bool` `char`
    /// - `i8 - i64` `isize`
    /// - `u8 - u64` `usize`
    /// - `f32` `f64`
    /// - `String`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    // - If key [`TypeId`] has already exist, the function will do nothing and return `false`.
    // - If the key [`TypeId`] does not exist, the function will insert value and return `true`.
    fn register_internal(&mut self, type_id: TypeId, get_type_meta: impl FnOnce() -> TypeMeta) -> bool {
        if self.type_meta_table.contains_key(&type_id) {
            return false;
        }
        let meta = get_type_meta();
        self.add_new_type_indices(&meta);
        self.type_meta_table.insert(type_id, meta);
        true
    }

    // The type must **not** already exist.
    fn add_new_type_indices(&mut self, meta: &TypeMeta) {
        let ty = meta.ty();
        self.registration_order.push(ty.id());
        self.type_path_to_id.entry(ty.path()).or_default().push(ty.id());
        self.type_name_to_id.entry(ty.name()).or_default().push(ty.id());
    }

    /// Try add or do nothing.
    ///
    /// Returns `false` if the type already exists.
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.register_internal(type_meta.type_id(), || type_meta)
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// This will also recursively register any type dependencies as specified by
    /// [`GetTypeMeta::register_dependencies`]. When deriving `Reflect`, these are
    /// the declared member types.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use vc_reflect::{derive::Reflect, registry::{TypeRegistry, TypeTraitDefault}};
    /// #[derive(Reflect, Default)]
    /// struct Foo {
    ///     pub name: Option<String>,
    ///     pub value: i32,
    /// }
    ///
    /// let mut type_registry = TypeRegistry::empty();
    /// type_registry.register::<Foo>();
    ///
    /// assert!(type_registry.contains(TypeId::of::<Foo>()));
    /// assert!(type_registry.contains(TypeId::of::<Option<String>>()));
    /// assert!(type_registry.contains(TypeId::of::<i32>()));
    /// assert!(type_registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Foo>()).is_some());
    /// ```
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Registers all types annotated with `#[reflect(auto_register)]`.
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// Returns `false` when the `auto_register` feature is disabled, in which
    /// case this does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use vc_reflect::{derive::Reflect, registry::TypeRegistry};
    /// #[derive(Reflect, Default)]
    /// #[reflect(auto_register)]
    /// struct Foo {
    ///     pub value: i32,
    /// }
    ///
    /// let mut type_registry = TypeRegistry::empty();
    /// if type_registry.auto_register() {
    ///     assert!(type_registry.contains(TypeId::of::<Foo>()));
    ///     assert!(type_registry.contains(TypeId::of::<i32>()));
    /// }
    /// ```
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::__register_types(self);
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Registers the type trait `D` for type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` has not been registered.
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(meta) => meta.insert_trait(D::from_type()),
            None => panic!(
                "attempted to call `TypeRegistry::register_type_trait` for type `{}` without registering it first",
                T::type_path(),
            ),
        }
    }

    /// Inserts type trait `D` for an already registered type.
    ///
    /// Returns `false` if the type is unknown.
    pub fn insert_type_trait<D: TypeTrait>(&mut self, type_id: TypeId, data: D) -> bool {
        match self.type_meta_table.get_mut(&type_id) {
            Some(meta) => {
                meta.insert_trait(data);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the first registered type with the given path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        self.iter_with_type_path(type_path).next()
    }

    /// Returns all types with the given path, in registration order.
    ///
    /// Paths are unique unless two types pin the same `type_path`.
    pub fn iter_with_type_path<'a>(&'a self, type_path: &str) -> impl Iterator<Item = &'a TypeMeta> + use<'a> {
        self.ids_to_metas(self.type_path_to_id.get(type_path))
    }

    /// Returns all types with the given name, in registration order.
    pub fn iter_with_type_name<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a TypeMeta> + use<'a> {
        self.ids_to_metas(self.type_name_to_id.get(type_name))
    }

    fn ids_to_metas<'a>(&'a self, ids: Option<&'a Vec<TypeId>>) -> impl Iterator<Item = &'a TypeMeta> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.type_meta_table.get(id))
    }

    /// Returns `true` if more than one registered type has this name.
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.type_name_to_id
            .get(type_name)
            .is_some_and(|ids| ids.len() > 1)
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Returns all types in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.registration_order
            .iter()
            .map(|id| &self.type_meta_table[id])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A synchronized wrapper around a [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Wraps an existing registry.
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.read().iter().map(TypeMeta::type_path))
            .finish()
    }
}
