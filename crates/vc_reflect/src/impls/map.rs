use alloc::collections::BTreeMap;
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Map, ReflectMut, ReflectRef};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

macro_rules! impl_reflect_string_map {
    ($map:ident, $path:literal, $name:literal) => {
        impl<V: TypePath> TypePath for $map<String, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$path, "<alloc::string::String, ", V::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$name, "<String, ", V::type_name(), ">"]))
            }
        }

        impl<V: Reflect + Typed> Typed for $map<String, V> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, V>(|entries| {
                        let mut map = $map::<String, V>::default();
                        for (key, value) in entries {
                            map.insert(key, value.take::<V>()?);
                        }
                        Ok(Box::new(map))
                    }))
                })
            }
        }

        impl<V: Reflect + Typed> Reflect for $map<String, V> {
            impl_reflect_cast_fn!(Map);

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }
        }

        impl<V: Reflect + Typed> Map for $map<String, V> {
            fn entries(&self) -> Vec<(&str, &dyn Reflect)> {
                let mut entries: Vec<(&str, &dyn Reflect)> = self
                    .iter()
                    .map(|(key, value)| (key.as_str(), value as &dyn Reflect))
                    .collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                entries
            }

            fn values_mut(&mut self) -> Vec<&mut dyn Reflect> {
                let mut entries: Vec<(&String, &mut V)> = self.iter_mut().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                entries
                    .into_iter()
                    .map(|(_, value)| value as &mut dyn Reflect)
                    .collect()
            }

            #[inline]
            fn len(&self) -> usize {
                $map::len(self)
            }
        }

        impl<V: Reflect + GetTypeMeta> GetTypeMeta for $map<String, V> {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::with_capacity::<Self>(1);
                meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<V>();
            }
        }
    };
}

impl_reflect_string_map!(BTreeMap, "alloc::collections::BTreeMap", "BTreeMap");
impl_reflect_string_map!(HashMap, "std::collections::HashMap", "HashMap");
