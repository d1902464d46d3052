use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{OptionInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Option(OptionInfo::new::<Self, T>(|value| match value {
                None => Ok(Box::new(None::<T>)),
                Some(value) => Ok(Box::new(Some(value.take::<T>()?))),
            }))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_cast_fn!(Option);

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self.as_ref().map(|v| v as &dyn Reflect))
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Option(self.as_mut().map(|v| v as &mut dyn Reflect))
    }
}

impl<T: Reflect + GetTypeMeta> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::with_capacity::<Self>(1);
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};

    #[test]
    fn from_option() {
        assert_eq!(<Option<u8>>::type_path(), "core::option::Option<u8>");

        let info = <Option<bool>>::type_info().as_option().unwrap();
        let none = info.from_option(None).unwrap();
        assert_eq!(none.take::<Option<bool>>().unwrap(), None);

        let some = info.from_option(Some(Box::new(true))).unwrap();
        assert_eq!(some.take::<Option<bool>>().unwrap(), Some(true));
    }
}
