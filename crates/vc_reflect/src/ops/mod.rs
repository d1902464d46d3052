//! Provide data access interfaces.
//!
//! The following are subtraits of [`Reflect`], each reachable from
//! [`ReflectRef`] / [`ReflectMut`]:
//!
//! - [`Struct`]: For structs with named fields.
//! - [`List`]: For list-like (e.g. `Vec<i32>`) .
//! - [`Map`]: For string keyed maps (e.g. `BTreeMap<String, f32>`) .
//!
//! Leaves are exposed as a borrowed [`Scalar`].
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod map_ops;
mod scalar_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::List;
pub use map_ops::Map;
pub use scalar_ops::{Scalar, non_finite_name};
pub use struct_ops::Struct;
