use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::{List, ReflectMut, ReflectRef};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>(|items| {
                let mut list = Vec::<T>::with_capacity(items.len());
                for item in items {
                    list.push(item.take::<T>()?);
                }
                Ok(Box::new(list))
            }))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    impl_reflect_cast_fn!(List);

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Reflect + GetTypeMeta> GetTypeMeta for Vec<T> {
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
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::ReflectRef;

    #[test]
    fn type_path() {
        assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(<Vec<Vec<String>>>::type_name(), "Vec<Vec<String>>");
    }

    #[test]
    fn from_items() {
        let info = <Vec<u32>>::type_info().as_list().unwrap();
        assert!(info.item_ty().is::<u32>());

        let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_u32), Box::new(2_u32)];
        let list = info.from_items(items).unwrap();
        assert_eq!(list.take::<Vec<u32>>().unwrap(), [1, 2]);

        let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_u32), Box::new(2_i8)];
        assert!(info.from_items(items).is_err());
    }

    #[test]
    fn list_access() {
        let value = vec![String::from("a"), String::from("b")];
        let ReflectRef::List(list) = value.reflect_ref() else {
            panic!("expected a list");
        };
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().downcast_ref::<String>().unwrap(), "b");
        assert!(list.get(2).is_none());
    }
}
