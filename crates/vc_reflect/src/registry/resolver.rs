//! Turns a type hint back into a registered type.
//!
//! A hint is written as `"<type path>, <module qualifier>"`, the qualifier
//! being optional. Resolution degrades in stages so data survives
//! refactors:
//!
//! 1. No hint: the expected concrete type.
//! 2. The path inside the named module.
//! 3. The path in any module, the qualifier is ignored.
//! 4. The simple name (last path segment) in any module, tolerating moved
//!    modules. Several matches are an ambiguity, see [`AmbiguityPolicy`].
//!
//! Every stage only considers types accepted by the [`Expected`] slot.

use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use log::{debug, warn};

use crate::hash::{HashMap, new_map};
use crate::registry::{TypeMeta, TypeRegistry};

// -----------------------------------------------------------------------------
// TypeHint

/// A parsed type hint.
///
/// # Examples
///
/// ```
/// use vc_reflect::registry::TypeHint;
///
/// let hint = TypeHint::parse("game::zoo::Dog, game_data").unwrap();
/// assert_eq!(hint.path(), "game::zoo::Dog");
/// assert_eq!(hint.module(), Some("game_data"));
/// assert_eq!(hint.simple_name(), "Dog");
///
/// // Commas inside generics belong to the path.
/// let hint = TypeHint::parse("std::collections::HashMap<alloc::string::String, u8>").unwrap();
/// assert_eq!(hint.module(), None);
///
/// assert!(TypeHint::parse("  ").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeHint<'a> {
    path: &'a str,
    module: Option<&'a str>,
}

impl<'a> TypeHint<'a> {
    /// Parses a hint, `None` if it is blank.
    ///
    /// Only the first qualifier after the path is kept, trailing
    /// comma-separated segments are ignored.
    pub fn parse(hint: &'a str) -> Option<Self> {
        let (path, rest) = match top_level_comma(hint) {
            Some(idx) => (&hint[..idx], Some(&hint[idx + 1..])),
            None => (hint, None),
        };

        let path = path.trim();
        if path.is_empty() {
            return None;
        }

        let module = rest
            .map(|rest| match top_level_comma(rest) {
                Some(idx) => rest[..idx].trim(),
                None => rest.trim(),
            })
            .filter(|module| !module.is_empty());

        Some(Self { path, module })
    }

    /// The qualified type name.
    #[inline]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// The module qualifier, if one was written.
    #[inline]
    pub const fn module(&self) -> Option<&'a str> {
        self.module
    }

    /// The last path segment, separators are `::`, `.` and `+`.
    pub fn simple_name(&self) -> &'a str {
        let mut depth = 0_usize;
        let mut start = 0_usize;
        let bytes = self.path.as_bytes();
        let mut idx = 0_usize;
        while idx < bytes.len() {
            match bytes[idx] {
                b'<' => depth += 1,
                b'>' => depth = depth.saturating_sub(1),
                b'.' | b'+' if depth == 0 => start = idx + 1,
                b':' if depth == 0 && bytes.get(idx + 1) == Some(&b':') => {
                    start = idx + 2;
                    idx += 1;
                }
                _ => {}
            }
            idx += 1;
        }
        &self.path[start..]
    }
}

fn top_level_comma(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            b'<' | b'[' => depth += 1,
            b'>' | b']' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

// -----------------------------------------------------------------------------
// Expected

/// What a slot accepts, used to filter resolution candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// Any registered type, e.g. the root of a dynamic load.
    Any,
    /// Exactly one concrete type, e.g. a struct typed field.
    Exactly(TypeId),
    /// Types carrying the given cast trait, e.g. a `Box<dyn Trait>` slot.
    ///
    /// The id is the one of `TypeTraitCast<dyn Trait>`.
    Castable(TypeId),
}

impl Expected {
    /// Returns `true` if the slot accepts the registered type.
    pub fn accepts(&self, meta: &TypeMeta) -> bool {
        match *self {
            Self::Any => true,
            Self::Exactly(id) => meta.type_id() == id,
            Self::Castable(cast_trait) => meta.has_trait_by_id(cast_trait),
        }
    }
}

// -----------------------------------------------------------------------------
// AmbiguityPolicy

/// What to do when the simple-name stage finds several candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmbiguityPolicy {
    /// Take the first candidate in registration order and log a warning.
    #[default]
    FirstFound,
    /// Report [`ResolveError::Ambiguous`].
    Fail,
}

// -----------------------------------------------------------------------------
// ResolveError

/// Why a hint could not be resolved.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("missing type hint for a polymorphic value")]
    MissingHint,
    #[error("type `{hint}` is not registered")]
    Unresolved { hint: String },
    #[error("type `{hint}` is ambiguous, candidates: {candidates:?}")]
    Ambiguous {
        hint: String,
        candidates: Vec<&'static str>,
    },
}

// -----------------------------------------------------------------------------
// ResolverCache

/// Memoised resolution results.
///
/// Safe for concurrent readers. Entries live until [`clear`](Self::clear)
/// is called, which is needed after registering new types that could
/// change an earlier answer.
pub struct ResolverCache {
    table: RwLock<HashMap<Expected, HashMap<Box<str>, TypeId>>>,
}

impl Default for ResolverCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: RwLock::new(new_map()),
        }
    }

    pub fn get(&self, hint: &str, expected: Expected) -> Option<TypeId> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&expected)
            .and_then(|table| table.get(hint))
            .copied()
    }

    pub fn insert(&self, hint: &str, expected: Expected, type_id: TypeId) {
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(expected)
            .or_insert_with(new_map)
            .insert(Box::from(hint), type_id);
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(HashMap::len)
            .sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// TypeResolver

/// Resolves type hints against a [`TypeRegistry`].
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_reflect::derive::Reflect;
/// use vc_reflect::registry::{Expected, TypeRegistry, TypeResolver};
///
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "game::zoo::Dog")]
/// struct Dog {}
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Dog>();
/// let resolver = TypeResolver::new(&registry);
///
/// let dog = TypeId::of::<Dog>();
/// assert_eq!(resolver.resolve(Some("game::zoo::Dog, game"), Expected::Any), Ok(dog));
/// // The module no longer exists.
/// assert_eq!(resolver.resolve(Some("game::zoo::Dog, old_game"), Expected::Any), Ok(dog));
/// // The type moved to another module.
/// assert_eq!(resolver.resolve(Some("game::animals::Dog"), Expected::Any), Ok(dog));
/// ```
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a TypeRegistry,
    cache: Option<&'a ResolverCache>,
    policy: AmbiguityPolicy,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver without cache and with [`AmbiguityPolicy::FirstFound`].
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            cache: None,
            policy: AmbiguityPolicy::FirstFound,
        }
    }

    #[inline]
    pub const fn with_cache(mut self, cache: &'a ResolverCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[inline]
    pub const fn with_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves `hint` for a slot expecting `expected`.
    ///
    /// A blank hint resolves to the expected concrete type, or fails with
    /// [`ResolveError::MissingHint`] when the slot is polymorphic.
    pub fn resolve(&self, hint: Option<&str>, expected: Expected) -> Result<TypeId, ResolveError> {
        let Some((raw, parsed)) = hint.and_then(|raw| TypeHint::parse(raw).map(|parsed| (raw, parsed)))
        else {
            return match expected {
                Expected::Exactly(type_id) => Ok(type_id),
                Expected::Any | Expected::Castable(_) => Err(ResolveError::MissingHint),
            };
        };

        if let Some(type_id) = self.cache.and_then(|cache| cache.get(raw, expected)) {
            return Ok(type_id);
        }

        let type_id = self.resolve_uncached(raw, &parsed, expected)?;

        if let Some(cache) = self.cache {
            cache.insert(raw, expected, type_id);
        }
        Ok(type_id)
    }

    fn resolve_uncached(
        &self,
        raw: &str,
        hint: &TypeHint<'_>,
        expected: Expected,
    ) -> Result<TypeId, ResolveError> {
        let by_path = || {
            self.registry
                .iter_with_type_path(hint.path())
                .filter(move |meta| expected.accepts(meta))
        };

        if let Some(module) = hint.module() {
            if let Some(meta) = by_path().find(|meta| meta.module() == module) {
                return Ok(meta.type_id());
            }
            debug!("type hint `{raw}`: not found in module `{module}`, searching all modules");
        }

        if let Some(meta) = by_path().next() {
            return Ok(meta.type_id());
        }

        let simple_name = hint.simple_name();
        let candidates: Vec<&TypeMeta> = self
            .registry
            .iter_with_type_name(simple_name)
            .filter(|meta| expected.accepts(meta))
            .collect();

        match candidates.as_slice() {
            [] => Err(ResolveError::Unresolved {
                hint: raw.to_owned(),
            }),
            [only] => {
                debug!("type hint `{raw}`: resolved by name to `{}`", only.type_path());
                Ok(only.type_id())
            }
            [first, ..] => {
                let paths: Vec<&'static str> = candidates.iter().map(|meta| meta.type_path()).collect();
                match self.policy {
                    AmbiguityPolicy::FirstFound => {
                        warn!(
                            "type hint `{raw}` is ambiguous, picking `{}` out of {paths:?}",
                            first.type_path()
                        );
                        Ok(first.type_id())
                    }
                    AmbiguityPolicy::Fail => Err(ResolveError::Ambiguous {
                        hint: raw.to_owned(),
                        candidates: paths,
                    }),
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
