use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// Constructs the default value of a type.
///
/// This is the constructor the deserializer uses after resolving a type
/// hint, members are assigned on the default instance afterwards.
#[derive(Clone, Copy)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    /// Creates a new default value.
    #[inline(always)]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Default + Typed + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}
