use core::any::{Any, TypeId};

use crate::info::{DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The core trait of dynamic access to a persisted value.
///
/// Implemented for scalars, `String`, `Vec<T>`, `Option<T>`, string keyed
/// maps, polymorphic `Box<dyn Trait>` slots and every type deriving
/// [`Reflect`](crate::derive::Reflect).
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, derive::Reflect, ops::ReflectRef};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let point: Box<dyn Reflect> = Box::new(Point { x: 1, y: 2 });
/// let ReflectRef::Struct(data) = point.reflect_ref() else { unreachable!() };
/// assert_eq!(data.field_len(), 2);
/// assert_eq!(point.downcast_ref::<Point>().unwrap().y, 2);
/// ```
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// Casts this type to a reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed reflected value.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Returns the `TypeId` of the underlying type.
    ///
    /// For a `Box<dyn Trait>` slot this is the slot type, the value inside
    /// is reached through [`ReflectRef::Dynamic`].
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Overwrites `self` with `value`, giving it back on a type mismatch.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the shape of the value.
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable enumeration of the value's shape.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable enumeration of the value's shape.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// See [`SaveHooks::prepare_save`](crate::SaveHooks::prepare_save).
    #[inline]
    fn prepare_save(&mut self) {}

    /// See [`SaveHooks::post_load`](crate::SaveHooks::post_load).
    #[inline]
    fn post_load(&mut self, full_path: &str, file_name: &str) {
        let _ = (full_path, file_name);
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            any.downcast::<T>()
                .map_err(|_| unreachable!("type is already checked"))
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing it.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// The fully qualified path of the underlying type.
    #[inline]
    pub fn reflect_type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
