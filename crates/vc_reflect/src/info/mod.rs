//! Provide compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: A trait for obtaining type names, without prefix `::`.
//! - [`Type`]: A `TypeId` with its path, name and module qualifier.
//! - [`TypeInfo`]: The cached schema of a type, one of:
//!     - [`StructInfo`]: named members, see [`MemberInfo`].
//!     - [`ListInfo`]: ordered sequences.
//!     - [`MapInfo`]: string keyed maps.
//!     - [`OptionInfo`]: optional values.
//!     - [`DynamicInfo`]: polymorphic trait object slots.
//!     - [`ScalarInfo`]: leaves.
//! - [`Typed`]: A trait for obtaining `TypeInfo` data.
//! - [`DynamicTyped`]: Provide dynamic dispatch for `Typed`.

// -----------------------------------------------------------------------------
// Modules

mod dynamic_info;
mod list_info;
mod map_info;
mod member_info;
mod option_info;
mod scalar_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use dynamic_info::{DynamicInfo, WrapFn};
pub use list_info::{FromItems, ListInfo};
pub use map_info::{FromEntries, MapInfo};
pub use member_info::{Marker, MemberAccess, MemberInfo, PropertyGetter, PropertySetter, Visibility};
pub use option_info::{FromOption, OptionInfo};
pub use scalar_info::{FromScalar, ScalarInfo, ScalarKind};
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{Type, TypePath, crate_name_of};
pub use typed::{DynamicTyped, Typed};
