use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Builds an option from an optional reflected value.
pub type FromOption =
    fn(value: Option<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// OptionInfo

/// Type information of `Option<T>`.
#[derive(Debug)]
pub struct OptionInfo {
    ty: Type,
    some_ty: Type,
    some_info: fn() -> &'static TypeInfo,
    from_option: FromOption,
}

impl OptionInfo {
    pub fn new<O: TypePath, T: Typed>(from_option: FromOption) -> Self {
        Self {
            ty: Type::of::<O>(),
            some_ty: Type::of::<T>(),
            some_info: T::type_info,
            from_option,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn some_ty(&self) -> &Type {
        &self.some_ty
    }

    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }

    #[inline]
    pub fn from_option(
        &self,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.from_option)(value)
    }
}
