use core::any::TypeId;

use serde_core::ser::{Error, SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::Reflect;
use crate::info::MemberAccess;
use crate::ops::{List, Map, ReflectRef, Scalar, Struct, non_finite_name};
use crate::serde::{HintPolicy, SerdeContext};

/// Serializes a reflected value with any [`Serializer`].
///
/// `declared` is the static type of the slot holding the value, `None`
/// for trait-object slots and dynamically saved roots. Under
/// [`HintPolicy::Auto`] a struct records its type hint only when its
/// runtime type differs from `declared`.
///
/// [`prepare_graph`](crate::serde::prepare_graph) is not called, see
/// [`SerdeContext::to_value`] for the complete save path.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_reflect::derive::Reflect;
/// use vc_reflect::registry::{TypeRegistry, TypeRegistryArc};
/// use vc_reflect::serde::{SerdeContext, SerdeSettings, SerializeDriver};
///
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "demo::Point")]
/// struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let ctx = SerdeContext::new(TypeRegistryArc::new(TypeRegistry::new()), SerdeSettings::default());
/// let point = Point { x: 1, y: 2 };
///
/// let typed = SerializeDriver::new(&point, Some(TypeId::of::<Point>()), &ctx);
/// assert_eq!(serde_json::to_string(&typed).unwrap(), r#"{"x":1,"y":2}"#);
///
/// let untyped = SerializeDriver::new(&point, None, &ctx);
/// assert_eq!(
///     serde_json::to_string(&untyped).unwrap(),
///     r#"{"$type":"demo::Point, demo","x":1,"y":2}"#,
/// );
/// ```
pub struct SerializeDriver<'a> {
    value: &'a dyn Reflect,
    declared: Option<TypeId>,
    ctx: &'a SerdeContext,
}

impl<'a> SerializeDriver<'a> {
    #[inline]
    pub const fn new(value: &'a dyn Reflect, declared: Option<TypeId>, ctx: &'a SerdeContext) -> Self {
        Self {
            value,
            declared,
            ctx,
        }
    }

    #[inline]
    fn child<'b>(&'b self, value: &'b dyn Reflect, declared: Option<TypeId>) -> SerializeDriver<'b> {
        SerializeDriver::new(value, declared, self.ctx)
    }

    fn serialize_struct<S: Serializer>(
        &self,
        this: &dyn Struct,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let type_info = self.value.reflect_type_info();
        let info = type_info.as_struct().map_err(S::Error::custom)?;
        let schema = self.ctx.schema(info);

        let settings = self.ctx.settings();
        let with_hint = match settings.hint_policy() {
            HintPolicy::Always => true,
            HintPolicy::Auto => self.declared != Some(self.value.ty_id()),
        };

        let len = schema.members().len() + usize::from(with_hint);
        let mut state = serializer.serialize_map(Some(len))?;

        if with_hint {
            state.serialize_entry(settings.hint_key(), &info.ty().hint())?;
        }

        for member in schema.members() {
            let declared = Some(member.info.ty().id());
            match member.info.access() {
                MemberAccess::Field(index) => {
                    let Some(field) = this.field_at(index) else {
                        return Err(S::Error::custom(format_args!(
                            "field `{}` is missing on `{}`",
                            member.info.name(),
                            info.ty().path(),
                        )));
                    };
                    state.serialize_entry(member.name, &self.child(field, declared))?;
                }
                MemberAccess::Property { get: Some(get), .. } => {
                    let Some(value) = get(self.value) else {
                        return Err(S::Error::custom(format_args!(
                            "property `{}` rejected a `{}` owner",
                            member.info.name(),
                            self.value.reflect_type_path(),
                        )));
                    };
                    state.serialize_entry(member.name, &self.child(&*value, declared))?;
                }
                MemberAccess::Property { get: None, .. } => {
                    return Err(S::Error::custom(format_args!(
                        "property `{}` of `{}` has no getter",
                        member.info.name(),
                        info.ty().path(),
                    )));
                }
            }
        }

        state.end()
    }

    fn serialize_list<S: Serializer>(&self, list: &dyn List, serializer: S) -> Result<S::Ok, S::Error> {
        let declared = self
            .value
            .reflect_type_info()
            .as_list()
            .map(|info| info.item_ty().id())
            .ok();

        let mut state = serializer.serialize_seq(Some(list.len()))?;
        for index in 0..list.len() {
            let Some(item) = list.get(index) else {
                return Err(S::Error::custom(format_args!("list item {index} is missing")));
            };
            state.serialize_element(&self.child(item, declared))?;
        }
        state.end()
    }

    fn serialize_map<S: Serializer>(&self, map: &dyn Map, serializer: S) -> Result<S::Ok, S::Error> {
        let declared = self
            .value
            .reflect_type_info()
            .as_map()
            .map(|info| info.value_ty().id())
            .ok();

        let mut state = serializer.serialize_map(Some(map.len()))?;
        for (key, value) in map.entries() {
            state.serialize_entry(key, &self.child(value, declared))?;
        }
        state.end()
    }
}

impl Serialize for SerializeDriver<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.reflect_ref() {
            ReflectRef::Struct(this) => self.serialize_struct(this, serializer),
            ReflectRef::List(list) => self.serialize_list(list, serializer),
            ReflectRef::Map(map) => self.serialize_map(map, serializer),
            ReflectRef::Option(None) => serializer.serialize_none(),
            ReflectRef::Option(Some(inner)) => {
                let declared = self
                    .value
                    .reflect_type_info()
                    .as_option()
                    .map(|info| info.some_ty().id())
                    .ok();
                serializer.serialize_some(&self.child(inner, declared))
            }
            // The slot type says nothing about the concrete value.
            ReflectRef::Dynamic(inner) => self.child(inner, None).serialize(serializer),
            ReflectRef::Scalar(scalar) => match scalar {
                Scalar::Bool(v) => serializer.serialize_bool(v),
                Scalar::Int(v) => serializer.serialize_i64(v),
                Scalar::UInt(v) => serializer.serialize_u64(v),
                Scalar::Float(v) => match non_finite_name(v) {
                    Some(name) => serializer.serialize_str(name),
                    None => serializer.serialize_f64(v),
                },
                Scalar::Char(v) => serializer.serialize_char(v),
                Scalar::Str(v) => serializer.serialize_str(v),
            },
        }
    }
}
