//! Conversion between reflected values and JSON node trees.
//!
//! # Overview
//!
//! - [`InclusionRule`]: decides which struct members are persisted,
//!   [`DefaultRule`] keeps public members unless excluded and private
//!   members only when included.
//! - [`SerdeSettings`]: type hint key, [`HintPolicy`], the rule and the
//!   resolution policies.
//! - [`SerdeContext`]: a registry plus settings and the caches, the entry
//!   point of every conversion.
//! - [`SerializeDriver`]: implements [`serde::Serialize`](serde_core::Serialize)
//!   for any reflected value.
//! - [`prepare_graph`]: runs the save hooks of a whole graph.
//!
//! # Type hints
//!
//! A struct whose runtime type is not known from its slot records it under
//! the hint key, `"$type"` by default:
//!
//! ```json
//! { "$type": "game::zoo::Dog, game_data", "name": "Rex" }
//! ```
//!
//! Loading resolves hints through [`TypeResolver`], which tolerates moved
//! modules and renamed crates. A hint on a concretely typed slot is only
//! advisory, the slot type wins.
//!
//! [`TypeResolver`]: crate::registry::TypeResolver

// -----------------------------------------------------------------------------
// Modules

mod context;
mod de;
mod error;
mod prepare;
mod rule;
mod schema;
mod ser;
mod settings;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use context::SerdeContext;
pub use error::{SerdeError, SerdeErrorKind};
pub use prepare::prepare_graph;
pub use rule::{Decision, DefaultRule, InclusionRule, PublicOnlyRule};
pub use schema::{IncludedMember, Schema, SchemaCache};
pub use ser::SerializeDriver;
pub use settings::{
    DEFAULT_HINT_KEY, HintPolicy, SerdeSettings, SerdeSettingsBuilder, UnresolvedPolicy,
};
