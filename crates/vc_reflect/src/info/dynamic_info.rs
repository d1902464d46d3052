use core::any::TypeId;

use crate::Reflect;
use crate::info::{Type, TypePath};
use crate::registry::TypeRegistry;

/// Wraps a concrete value into the slot type, giving it back when the
/// registry knows no cast for it.
pub type WrapFn =
    fn(registry: &TypeRegistry, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// DynamicInfo

/// Type information of a polymorphic slot, e.g. `Box<dyn Animal>`.
///
/// The runtime type of the slot is only known from the type hint, any
/// registered type carrying a [`TypeTraitCast`] for the base can fill it.
///
/// Implemented through [`impl_reflect_dyn!`](crate::impl_reflect_dyn).
///
/// [`TypeTraitCast`]: crate::registry::TypeTraitCast
#[derive(Debug)]
pub struct DynamicInfo {
    ty: Type,
    base: Type,
    cast_trait: TypeId,
    wrap: WrapFn,
}

impl DynamicInfo {
    /// Creates a new [`DynamicInfo`] for slot `S` over base `B`.
    ///
    /// `cast_trait` is the `TypeId` of the `TypeTraitCast<B>` registered by implementors.
    pub fn new<S: TypePath, B: TypePath + ?Sized>(cast_trait: TypeId, wrap: WrapFn) -> Self {
        Self {
            ty: Type::of::<S>(),
            base: Type::of::<B>(),
            cast_trait,
            wrap,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The trait object type, e.g. `dyn Animal`.
    #[inline]
    pub const fn base(&self) -> &Type {
        &self.base
    }

    /// `TypeId` of the cast trait that candidates must carry.
    #[inline]
    pub const fn cast_trait(&self) -> TypeId {
        self.cast_trait
    }

    /// See [`WrapFn`].
    #[inline]
    pub fn wrap(
        &self,
        registry: &TypeRegistry,
        value: Box<dyn Reflect>,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(registry, value)
    }
}
