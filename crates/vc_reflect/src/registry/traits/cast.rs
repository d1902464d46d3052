use core::fmt;

use crate::Reflect;

/// Converts a concrete reflected value into the trait object `D`.
///
/// Registered by `#[reflect(implements(Trait))]` as `TypeTraitCast<dyn Trait>`,
/// its presence is what makes a type a valid candidate for a `Box<dyn Trait>` slot.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, derive::Reflect, impl_reflect_dyn};
/// use vc_reflect::registry::{TypeRegistry, TypeTraitCast};
///
/// pub trait Named: Reflect {
///     fn name(&self) -> &str;
/// }
/// impl_reflect_dyn!(Named);
///
/// #[derive(Reflect, Default)]
/// #[reflect(implements(Named))]
/// pub struct Tag {
///     pub label: String,
/// }
///
/// impl Named for Tag {
///     fn name(&self) -> &str { &self.label }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Tag>();
///
/// let cast = registry
///     .get_type_trait::<TypeTraitCast<dyn Named>>(core::any::TypeId::of::<Tag>())
///     .unwrap();
/// let named: Box<dyn Named> = cast.cast(Box::new(Tag { label: "x".into() })).ok().unwrap();
/// assert_eq!(named.name(), "x");
/// ```
pub struct TypeTraitCast<D: ?Sized + 'static> {
    func: fn(Box<dyn Reflect>) -> Result<Box<D>, Box<dyn Reflect>>,
}

impl<D: ?Sized + 'static> TypeTraitCast<D> {
    /// Creates a new cast from a conversion function.
    #[inline]
    pub const fn new(func: fn(Box<dyn Reflect>) -> Result<Box<D>, Box<dyn Reflect>>) -> Self {
        Self { func }
    }

    /// Converts `value`, giving it back if it is not the registered type.
    #[inline]
    pub fn cast(&self, value: Box<dyn Reflect>) -> Result<Box<D>, Box<dyn Reflect>> {
        (self.func)(value)
    }
}

impl<D: ?Sized + 'static> Clone for TypeTraitCast<D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized + 'static> Copy for TypeTraitCast<D> {}

impl<D: ?Sized + 'static> fmt::Debug for TypeTraitCast<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeTraitCast")
    }
}
