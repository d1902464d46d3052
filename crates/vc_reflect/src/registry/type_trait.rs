use core::any::Any;

/// A capability of a type, stored in its [`TypeMeta`](crate::registry::TypeMeta).
///
/// Auto implemented for every `Send + Sync + 'static` type, so any plain
/// struct can act as type data.
pub trait TypeTrait: Any + Send + Sync {}

impl<T: Any + Send + Sync> TypeTrait for T {}

impl dyn TypeTrait {
    /// Downcasts the type trait to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the type trait to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}
