use core::any::TypeId;
use core::fmt;
use alloc::sync::Arc;

use serde_json::Value;

use crate::Reflect;
use crate::info::{StructInfo, TypeInfo, Typed};
use crate::registry::{ResolverCache, TypeRegistry, TypeRegistryArc, TypeResolver};
use crate::serde::de::DeserializeDriver;
use crate::serde::{Schema, SchemaCache, SerdeError, SerdeErrorKind, SerdeSettings};
use crate::serde::{SerializeDriver, prepare_graph};

/// Everything a conversion between reflected values and JSON nodes needs.
///
/// Owns the caches, so one context should be shared by every conversion
/// using the same registry and settings. Conversions only take read locks.
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_reflect::registry::{TypeRegistry, TypeRegistryArc};
/// use vc_reflect::serde::{SerdeContext, SerdeSettings};
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// struct Stats {
///     pub hp: i32,
///     pub tags: Vec<String>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Stats>();
/// let ctx = SerdeContext::new(TypeRegistryArc::new(registry), SerdeSettings::default());
///
/// let mut stats = Stats { hp: 7, tags: vec!["fast".into()] };
/// let node = ctx.to_value(&mut stats).unwrap();
/// assert_eq!(node, serde_json::json!({ "hp": 7, "tags": ["fast"] }));
///
/// let back: Option<Stats> = ctx.from_value(&node).unwrap();
/// assert_eq!(back, Some(stats));
/// ```
pub struct SerdeContext {
    registry: TypeRegistryArc,
    settings: Arc<SerdeSettings>,
    schemas: SchemaCache,
    resolver_cache: ResolverCache,
}

impl fmt::Debug for SerdeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeContext")
            .field("settings", &self.settings)
            .field("schemas", &self.schemas.len())
            .field("resolved_hints", &self.resolver_cache.len())
            .finish_non_exhaustive()
    }
}

impl SerdeContext {
    #[inline]
    pub fn new(registry: TypeRegistryArc, settings: SerdeSettings) -> Self {
        Self::with_shared_settings(registry, Arc::new(settings))
    }

    pub fn with_shared_settings(registry: TypeRegistryArc, settings: Arc<SerdeSettings>) -> Self {
        Self {
            registry,
            settings,
            schemas: SchemaCache::new(),
            resolver_cache: ResolverCache::new(),
        }
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    #[inline]
    pub fn settings(&self) -> &SerdeSettings {
        &self.settings
    }

    #[inline]
    pub fn shared_settings(&self) -> &Arc<SerdeSettings> {
        &self.settings
    }

    /// The persisted members of a struct type under the configured rule.
    #[inline]
    pub fn schema(&self, info: &'static StructInfo) -> Arc<Schema> {
        self.schemas.get_or_build(info, self.settings.rule(), self.settings.hint_key())
    }

    /// A resolver sharing this context's cache and ambiguity policy.
    #[inline]
    pub fn resolver<'a>(&'a self, registry: &'a TypeRegistry) -> TypeResolver<'a> {
        TypeResolver::new(registry)
            .with_cache(&self.resolver_cache)
            .with_policy(self.settings.ambiguity_policy())
    }

    /// Drops cached schemas and resolutions.
    ///
    /// Needed after registering types that could change earlier results.
    pub fn clear_caches(&self) {
        self.schemas.clear();
        self.resolver_cache.clear();
    }

    // -------------------------------------------------------------------------
    // To nodes

    /// Prepares and serializes a value of a known type.
    ///
    /// The root only records its type hint under
    /// [`HintPolicy::Always`](crate::serde::HintPolicy::Always).
    #[inline]
    pub fn to_value<T: Reflect>(&self, value: &mut T) -> Result<Value, SerdeError> {
        self.to_value_declared(value, Some(TypeId::of::<T>()))
    }

    /// Prepares and serializes a value, the root records its type hint.
    #[inline]
    pub fn to_value_dyn(&self, value: &mut dyn Reflect) -> Result<Value, SerdeError> {
        self.to_value_declared(value, None)
    }

    /// Runs [`prepare_graph`] and then [`serialize`](Self::serialize).
    pub fn to_value_declared(
        &self,
        value: &mut dyn Reflect,
        declared: Option<TypeId>,
    ) -> Result<Value, SerdeError> {
        prepare_graph(value);
        self.serialize(value, declared)
    }

    /// Serializes without calling any save hook.
    pub fn serialize(&self, value: &dyn Reflect, declared: Option<TypeId>) -> Result<Value, SerdeError> {
        Ok(serde_json::to_value(SerializeDriver::new(value, declared, self))?)
    }

    // -------------------------------------------------------------------------
    // From nodes

    /// Deserializes a value of a known type, `None` for a `null` node.
    pub fn from_value<T: Reflect + Typed>(&self, node: &Value) -> Result<Option<T>, SerdeError> {
        let Some(value) = self.from_value_with_info(node, T::type_info())? else {
            return Ok(None);
        };
        value.take::<T>().map(Some).map_err(|value| {
            SerdeError::new(SerdeErrorKind::TypeMismatch {
                expected: T::type_path(),
                found: value.reflect_type_path(),
            })
        })
    }

    /// Deserializes a node expected to be of the type described by `info`.
    ///
    /// A type hint on the root struct is only checked, it never changes
    /// the resulting type.
    pub fn from_value_with_info(
        &self,
        node: &Value,
        info: &'static TypeInfo,
    ) -> Result<Option<Box<dyn Reflect>>, SerdeError> {
        if node.is_null() {
            return Ok(None);
        }
        let registry = self.registry.read();
        DeserializeDriver::new(self, &registry).read(node, info).map(Some)
    }

    /// Deserializes a node whose type is only known from its type hint.
    pub fn from_value_dyn(&self, node: &Value) -> Result<Option<Box<dyn Reflect>>, SerdeError> {
        if node.is_null() {
            return Ok(None);
        }
        let registry = self.registry.read();
        DeserializeDriver::new(self, &registry).read_any(node).map(Some)
    }
}
