use crate::info::Typed;

/// Creates a [`TypeTrait`](crate::registry::TypeTrait) from type `T`.
///
/// # Examples
///
/// ```
/// use vc_reflect::registry::{FromType, TypeTraitDefault};
///
/// let f = <TypeTraitDefault as FromType<u32>>::from_type();
/// assert_eq!(f.default().take::<u32>().unwrap(), 0);
/// ```
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
