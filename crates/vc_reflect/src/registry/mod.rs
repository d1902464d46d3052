//! Provide the type registry and the type resolver.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: A trait representing a capability supported by a type.
//! - [`FromType`]: A trait provide a function to crate a `TypeTrait` from a type.
//! - [`TypeMeta`]: A container including a [`TypeInfo`] and a [`TypeTrait`] table.
//! - [`GetTypeMeta`]: A trait provide a function to crate a `TypeMeta` from a type.
//! - [`TypeRegistry`]: A container for storaging and operating `TypeMeta`s.
//! - TypeTraits:
//!     - [`TypeTraitDefault`]: Constructs the default value of a type.
//!     - [`TypeTraitCast`]: Casts a concrete value into a trait object slot.
//! - [`TypeResolver`]: Turns type hints back into registered types.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`] .
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod resolver;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use resolver::{AmbiguityPolicy, Expected, ResolveError, ResolverCache, TypeHint, TypeResolver};
pub use traits::{TypeTraitCast, TypeTraitDefault};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;
