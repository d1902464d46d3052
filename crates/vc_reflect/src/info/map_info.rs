use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Builds a map from reflected entries, giving the first mismatched value back.
pub type FromEntries =
    fn(entries: Vec<(String, Box<dyn Reflect>)>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// MapInfo

/// Type information of a string keyed map.
///
/// Keys are always text, so a map becomes a plain object node.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    value_ty: Type,
    value_info: fn() -> &'static TypeInfo,
    from_entries: FromEntries,
}

impl MapInfo {
    /// Creates a new [`MapInfo`] for map `M` of values `V`.
    pub fn new<M: TypePath, V: Typed>(from_entries: FromEntries) -> Self {
        Self {
            ty: Type::of::<M>(),
            value_ty: Type::of::<V>(),
            value_info: V::type_info,
            from_entries,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn value_ty(&self) -> &Type {
        &self.value_ty
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    /// See [`FromEntries`].
    #[inline]
    pub fn from_entries(
        &self,
        entries: Vec<(String, Box<dyn Reflect>)>,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.from_entries)(entries)
    }
}
