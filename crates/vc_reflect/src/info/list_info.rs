use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Builds a list from reflected items, giving the first mismatched item back.
pub type FromItems = fn(items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// ListInfo

/// Type information of an ordered sequence such as `Vec<T>`.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item_ty: Type,
    item_info: fn() -> &'static TypeInfo,
    from_items: FromItems,
}

impl ListInfo {
    /// Creates a new [`ListInfo`] for list `L` of items `T`.
    pub fn new<L: TypePath, T: Typed>(from_items: FromItems) -> Self {
        Self {
            ty: Type::of::<L>(),
            item_ty: Type::of::<T>(),
            item_info: T::type_info,
            from_items,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn item_ty(&self) -> &Type {
        &self.item_ty
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// See [`FromItems`].
    #[inline]
    pub fn from_items(
        &self,
        items: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.from_items)(items)
    }
}
