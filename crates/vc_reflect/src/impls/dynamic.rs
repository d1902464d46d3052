/// Makes `Box<dyn Trait>` a polymorphic slot.
///
/// The trait must have [`Reflect`](crate::Reflect) as a supertrait. Any
/// registered type that declares `#[reflect(implements(Trait))]` can fill
/// the slot, its concrete type is recorded in the type hint.
///
/// The macro implements `TypePath` for `dyn Trait` and `TypePath`,
/// `Typed`, `Reflect` and `GetTypeMeta` for `Box<dyn Trait>`.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, derive::Reflect, impl_reflect_dyn};
/// use vc_reflect::info::TypePath;
///
/// pub trait Shape: Reflect {
///     fn area(&self) -> f32;
/// }
///
/// impl_reflect_dyn!(Shape);
///
/// #[derive(Reflect, Default)]
/// #[reflect(implements(Shape))]
/// pub struct Square {
///     pub side: f32,
/// }
///
/// impl Shape for Square {
///     fn area(&self) -> f32 { self.side * self.side }
/// }
///
/// assert_eq!(<dyn Shape>::type_name(), "dyn Shape");
/// ```
#[macro_export]
macro_rules! impl_reflect_dyn {
    ($trait_name:ident) => {
        impl $crate::info::TypePath for dyn $trait_name {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!("dyn ", ::core::module_path!(), "::", ::core::stringify!($trait_name))
            }

            #[inline]
            fn type_name() -> &'static str {
                ::core::concat!("dyn ", ::core::stringify!($trait_name))
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(::core::module_path!())
            }

            #[inline]
            fn module_qualifier() -> &'static str {
                $crate::info::crate_name_of(::core::module_path!())
            }
        }

        impl $crate::info::TypePath for ::std::boxed::Box<dyn $trait_name> {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(
                    "alloc::boxed::Box<dyn ",
                    ::core::module_path!(),
                    "::",
                    ::core::stringify!($trait_name),
                    ">"
                )
            }

            #[inline]
            fn type_name() -> &'static str {
                ::core::concat!("Box<dyn ", ::core::stringify!($trait_name), ">")
            }
        }

        impl $crate::info::Typed for ::std::boxed::Box<dyn $trait_name> {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Dynamic($crate::info::DynamicInfo::new::<
                        Self,
                        dyn $trait_name,
                    >(
                        ::core::any::TypeId::of::<$crate::registry::TypeTraitCast<dyn $trait_name>>(),
                        |registry, value| {
                            match registry.get_type_trait::<$crate::registry::TypeTraitCast<dyn $trait_name>>(
                                value.ty_id(),
                            ) {
                                ::core::option::Option::Some(cast) => cast
                                    .cast(value)
                                    .map(|slot| ::std::boxed::Box::new(slot) as ::std::boxed::Box<dyn $crate::Reflect>),
                                ::core::option::Option::None => ::core::result::Result::Err(value),
                            }
                        },
                    ))
                })
            }
        }

        impl $crate::Reflect for ::std::boxed::Box<dyn $trait_name> {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn $crate::Reflect>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> $crate::info::ReflectKind {
                $crate::info::ReflectKind::Dynamic
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
                $crate::ops::ReflectRef::Dynamic(&**self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
                $crate::ops::ReflectMut::Dynamic(&mut **self)
            }

            // Only the root of a load receives `post_load`, forward it when
            // the root is a slot. `prepare_save` is reached by the graph walk.
            #[inline]
            fn post_load(&mut self, full_path: &str, file_name: &str) {
                $crate::Reflect::post_load(&mut **self, full_path, file_name);
            }
        }

        impl $crate::registry::GetTypeMeta for ::std::boxed::Box<dyn $trait_name> {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                $crate::registry::TypeMeta::of::<Self>()
            }
        }
    };
}
