//! Provide some utilities for implementing reflection traits.
//!
//! - [`concat`]: An efficient string concatenation function.
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//! - [`impl_reflect_dyn!`](crate::impl_reflect_dyn): Makes `Box<dyn Trait>` a polymorphic slot.
//!
//! ## Implemented Menu
//!
//! - `bool`, `char`, `i8`-`i64`, `isize`, `u8`-`u64`, `usize`, `f32`, `f64`
//! - `String`
//! - `Vec<T>`, `Option<T>`
//! - `BTreeMap<String, V>`, `HashMap<String, V>`
//!
//! [`TypePath`]: crate::info::TypePath
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod dynamic;
mod map;
mod option;
mod scalar;
mod vec;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// An efficient string concatenation function.
///
/// Usually used for generic type path.
///
/// # Example
///
/// ```
/// # use vc_reflect::impls::concat;
/// let s = concat(&["alloc::vec::Vec", "<", "u8", ">"]);
/// assert_eq!(s, "alloc::vec::Vec<u8>");
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
