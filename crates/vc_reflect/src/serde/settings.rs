use core::fmt;
use alloc::sync::Arc;

use crate::registry::AmbiguityPolicy;
use crate::serde::{DefaultRule, InclusionRule};

/// The default key of the type hint entry.
pub const DEFAULT_HINT_KEY: &str = "$type";

// -----------------------------------------------------------------------------
// Policies

/// When structs record their runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HintPolicy {
    /// Only when the runtime type differs from the declared one, e.g. the
    /// value of a `Box<dyn Trait>` slot or a dynamically saved root.
    #[default]
    Auto,
    /// On every struct.
    Always,
}

/// What to do with a list element or map entry whose type hint cannot be
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnresolvedPolicy {
    /// The whole value fails to load.
    #[default]
    Fail,
    /// The element or entry is dropped and a warning is logged.
    SkipElement,
}

// -----------------------------------------------------------------------------
// SerdeSettings

/// Immutable serialization settings.
///
/// # Examples
///
/// ```
/// use vc_reflect::serde::{HintPolicy, PublicOnlyRule, SerdeSettings};
///
/// let settings = SerdeSettings::builder()
///     .hint_key("@kind")
///     .hint_policy(HintPolicy::Always)
///     .rule(PublicOnlyRule)
///     .build();
///
/// assert_eq!(settings.hint_key(), "@kind");
/// ```
pub struct SerdeSettings {
    hint_key: Box<str>,
    hint_policy: HintPolicy,
    rule: Arc<dyn InclusionRule>,
    ambiguity_policy: AmbiguityPolicy,
    unresolved_policy: UnresolvedPolicy,
}

impl Default for SerdeSettings {
    #[inline]
    fn default() -> Self {
        SerdeSettingsBuilder::new().build()
    }
}

impl fmt::Debug for SerdeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeSettings")
            .field("hint_key", &self.hint_key)
            .field("hint_policy", &self.hint_policy)
            .field("ambiguity_policy", &self.ambiguity_policy)
            .field("unresolved_policy", &self.unresolved_policy)
            .finish_non_exhaustive()
    }
}

impl SerdeSettings {
    #[inline]
    pub fn builder() -> SerdeSettingsBuilder {
        SerdeSettingsBuilder::new()
    }

    #[inline]
    pub fn hint_key(&self) -> &str {
        &self.hint_key
    }

    #[inline]
    pub fn hint_policy(&self) -> HintPolicy {
        self.hint_policy
    }

    #[inline]
    pub fn rule(&self) -> &dyn InclusionRule {
        &*self.rule
    }

    #[inline]
    pub fn ambiguity_policy(&self) -> AmbiguityPolicy {
        self.ambiguity_policy
    }

    #[inline]
    pub fn unresolved_policy(&self) -> UnresolvedPolicy {
        self.unresolved_policy
    }
}

// -----------------------------------------------------------------------------
// SerdeSettingsBuilder

/// Builder of [`SerdeSettings`].
#[derive(Clone)]
#[must_use]
pub struct SerdeSettingsBuilder {
    hint_key: Box<str>,
    hint_policy: HintPolicy,
    rule: Arc<dyn InclusionRule>,
    ambiguity_policy: AmbiguityPolicy,
    unresolved_policy: UnresolvedPolicy,
}

impl Default for SerdeSettingsBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerdeSettingsBuilder {
    pub fn new() -> Self {
        Self {
            hint_key: Box::from(DEFAULT_HINT_KEY),
            hint_policy: HintPolicy::Auto,
            rule: Arc::new(DefaultRule),
            ambiguity_policy: AmbiguityPolicy::FirstFound,
            unresolved_policy: UnresolvedPolicy::Fail,
        }
    }

    /// Overrides the key of the hint entry, `"$type"` by default.
    pub fn hint_key(mut self, key: impl Into<Box<str>>) -> Self {
        self.hint_key = key.into();
        self
    }

    pub fn hint_policy(mut self, policy: HintPolicy) -> Self {
        self.hint_policy = policy;
        self
    }

    /// Replaces the [`DefaultRule`].
    pub fn rule(mut self, rule: impl InclusionRule) -> Self {
        self.rule = Arc::new(rule);
        self
    }

    pub fn ambiguity_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity_policy = policy;
        self
    }

    pub fn unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_policy = policy;
        self
    }

    pub fn build(self) -> SerdeSettings {
        SerdeSettings {
            hint_key: self.hint_key,
            hint_policy: self.hint_policy,
            rule: self.rule,
            ambiguity_policy: self.ambiguity_policy,
            unresolved_policy: self.unresolved_policy,
        }
    }
}
