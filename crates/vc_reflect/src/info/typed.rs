use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// allowing access to the cached schema without an instance of the type.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::{Typed, TypeInfo}};
///
/// #[derive(Reflect, Default)]
/// struct A { value: u32 }
///
/// let info: &'static TypeInfo = <A as Typed>::type_info();
/// assert_eq!(info.as_struct().unwrap().member_len(), 1);
/// ```
///
/// # Manually Impl
///
/// Use [`NonGenericTypeInfoCell`] or [`GenericTypeInfoCell`] to build the
/// info exactly once.
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// A static accessor to compile-time type information.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Provide dynamic dispatch for types that implement [`Typed`].
///
/// Auto impl for all types that implemented [`Typed`].
pub trait DynamicTyped {
    /// Returns the [`TypeInfo`] of the underlying type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_reflect::{derive::Reflect, Reflect, info::DynamicTyped};
    /// #[derive(Reflect, Default)]
    /// struct A { value: u64 }
    ///
    /// let a = Box::new(A { value: 1 }) as Box<dyn Reflect>;
    /// assert_eq!(a.reflect_type_info().type_name(), "A");
    /// ```
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
