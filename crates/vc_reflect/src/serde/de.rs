use log::{debug, warn};
use serde_json::{Map as JsonMap, Value};

use crate::Reflect;
use crate::info::{
    DynamicInfo, ListInfo, MapInfo, MemberAccess, OptionInfo, ScalarInfo, StructInfo, TypeInfo,
};
use crate::ops::{ReflectMut, Scalar};
use crate::registry::{Expected, TypeRegistry, TypeResolver, TypeTraitDefault};
use crate::serde::{IncludedMember, SerdeContext, SerdeError, SerdeErrorKind, UnresolvedPolicy};

#[inline]
fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[inline]
fn invalid_node(expected: &'static str, node: &Value) -> SerdeError {
    SerdeError::new(SerdeErrorKind::InvalidNode {
        expected,
        found: node_kind(node),
    })
}

/// Rebuilds reflected values from a JSON node tree.
///
/// Works on [`Value`] rather than a streaming deserializer, the type hint
/// of an object may appear after its members.
pub(crate) struct DeserializeDriver<'a> {
    ctx: &'a SerdeContext,
    registry: &'a TypeRegistry,
    resolver: TypeResolver<'a>,
}

impl<'a> DeserializeDriver<'a> {
    pub fn new(ctx: &'a SerdeContext, registry: &'a TypeRegistry) -> Self {
        Self {
            ctx,
            registry,
            resolver: ctx.resolver(registry),
        }
    }

    #[inline]
    fn hint_of<'v>(&self, object: &'v JsonMap<String, Value>) -> Option<&'v str> {
        object
            .get(self.ctx.settings().hint_key())
            .and_then(Value::as_str)
    }

    /// Reads a node of the type described by `info`.
    pub fn read(&self, node: &Value, info: &'static TypeInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        match info {
            TypeInfo::Struct(info) => self.read_struct(node, info),
            TypeInfo::List(info) => self.read_list(node, info),
            TypeInfo::Map(info) => self.read_map(node, info),
            TypeInfo::Option(info) => self.read_option(node, info),
            TypeInfo::Dynamic(info) => self.read_dynamic(node, info),
            TypeInfo::Scalar(info) => self.read_scalar(node, info),
        }
    }

    /// Reads an object whose type is given by its hint alone.
    pub fn read_any(&self, node: &Value) -> Result<Box<dyn Reflect>, SerdeError> {
        let object = node.as_object().ok_or_else(|| invalid_node("object", node))?;
        let type_id = self.resolver.resolve(self.hint_of(object), Expected::Any)?;
        let info = self
            .registry
            .get_type_info(type_id)
            .ok_or_else(|| SerdeError::custom("resolved type is missing from the registry"))?;
        self.read(node, info)
    }

    fn read_struct(&self, node: &Value, info: &'static StructInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        let object = node.as_object().ok_or_else(|| invalid_node("object", node))?;

        // A concrete slot always wins over a stale hint.
        let expected = info.ty().id();
        if let Some(hint) = self.hint_of(object)
            && let Err(err) = self.resolver.resolve(Some(hint), Expected::Exactly(expected))
        {
            debug!("hint `{hint}` ignored for `{}`: {err}", info.ty().path());
        }

        let mut value = self.construct(info)?;
        let schema = self.ctx.schema(info);
        let hint_key = self.ctx.settings().hint_key();

        for (key, child) in object {
            if key == hint_key {
                continue;
            }
            let Some(member) = schema.member(key) else {
                continue;
            };
            let member_value = self
                .read(child, member.info.type_info())
                .map_err(|err| err.within_member(key))?;
            assign(&mut *value, member, member_value).map_err(|err| err.within_member(key))?;
        }

        Ok(value)
    }

    fn construct(&self, info: &'static StructInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        self.registry
            .get_type_trait::<TypeTraitDefault>(info.ty().id())
            .map(TypeTraitDefault::default)
            .ok_or_else(|| SerdeError::new(SerdeErrorKind::NotConstructible(info.ty().path())))
    }

    fn read_list(&self, node: &Value, info: &'static ListInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        let array = node.as_array().ok_or_else(|| invalid_node("array", node))?;
        let item_info = info.item_info();
        let skip_unresolved = self.ctx.settings().unresolved_policy() == UnresolvedPolicy::SkipElement;

        let mut items = Vec::with_capacity(array.len());
        for (index, child) in array.iter().enumerate() {
            match self.read(child, item_info) {
                Ok(item) => items.push(item),
                Err(err) if skip_unresolved && err.is_resolve() => {
                    warn!("dropped element {index} of `{}`: {err}", info.ty().path());
                }
                Err(err) => return Err(err.within_index(index)),
            }
        }

        info.from_items(items).map_err(|item| mismatch(info.item_ty().path(), &*item))
    }

    fn read_map(&self, node: &Value, info: &'static MapInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        let object = node.as_object().ok_or_else(|| invalid_node("object", node))?;
        let value_info = info.value_info();
        let skip_unresolved = self.ctx.settings().unresolved_policy() == UnresolvedPolicy::SkipElement;

        let mut entries = Vec::with_capacity(object.len());
        for (key, child) in object {
            match self.read(child, value_info) {
                Ok(value) => entries.push((key.clone(), value)),
                Err(err) if skip_unresolved && err.is_resolve() => {
                    warn!("dropped entry `{key}` of `{}`: {err}", info.ty().path());
                }
                Err(err) => return Err(err.within_member(key)),
            }
        }

        info.from_entries(entries)
            .map_err(|value| mismatch(info.value_ty().path(), &*value))
    }

    fn read_option(&self, node: &Value, info: &'static OptionInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        let inner = if node.is_null() {
            None
        } else {
            Some(self.read(node, info.some_info())?)
        };
        info.from_option(inner)
            .map_err(|value| mismatch(info.some_ty().path(), &*value))
    }

    fn read_dynamic(&self, node: &Value, info: &'static DynamicInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        let object = node.as_object().ok_or_else(|| invalid_node("object", node))?;
        let hint = self.hint_of(object);
        let type_id = self
            .resolver
            .resolve(hint, Expected::Castable(info.cast_trait()))?;

        let concrete = self
            .registry
            .get_type_info(type_id)
            .ok_or_else(|| SerdeError::new(SerdeErrorKind::NotRegistered(info.base().path())))?;
        let value = self.read(node, concrete)?;

        info.wrap(self.registry, value).map_err(|value| {
            SerdeError::new(SerdeErrorKind::NotCastable {
                value: value.reflect_type_path(),
                slot: info.ty().path(),
            })
        })
    }

    fn read_scalar(&self, node: &Value, info: &'static ScalarInfo) -> Result<Box<dyn Reflect>, SerdeError> {
        let scalar = match node {
            Value::Bool(v) => Scalar::Bool(*v),
            Value::String(v) => Scalar::Str(v.as_str()),
            Value::Number(v) => {
                if let Some(v) = v.as_u64() {
                    Scalar::UInt(v)
                } else if let Some(v) = v.as_i64() {
                    Scalar::Int(v)
                } else if let Some(v) = v.as_f64() {
                    Scalar::Float(v)
                } else {
                    return Err(invalid_node("finite number", node));
                }
            }
            _ => return Err(invalid_node("scalar", node)),
        };

        info.from_scalar(scalar).ok_or_else(|| {
            SerdeError::new(SerdeErrorKind::InvalidScalar {
                type_path: info.ty().path(),
                value: scalar.to_string(),
            })
        })
    }
}

fn mismatch(expected: &'static str, found: &dyn Reflect) -> SerdeError {
    SerdeError::new(SerdeErrorKind::TypeMismatch {
        expected,
        found: found.reflect_type_path(),
    })
}

fn assign(
    target: &mut dyn Reflect,
    member: &IncludedMember,
    value: Box<dyn Reflect>,
) -> Result<(), SerdeError> {
    let expected = member.info.type_path();
    match member.info.access() {
        MemberAccess::Field(index) => {
            let owner = target.reflect_type_path();
            let ReflectMut::Struct(this) = target.reflect_mut() else {
                return Err(SerdeError::custom(format_args!("`{owner}` is not a struct")));
            };
            let Some(field) = this.field_at_mut(index) else {
                return Err(SerdeError::custom(format_args!(
                    "field `{}` is missing on `{owner}`",
                    member.info.name()
                )));
            };
            field.set(value).map_err(|value| mismatch(expected, &*value))
        }
        MemberAccess::Property { set: Some(set), .. } => {
            set(target, value).map_err(|value| mismatch(expected, &*value))
        }
        MemberAccess::Property { set: None, .. } => Err(SerdeError::custom(format_args!(
            "property `{}` has no setter",
            member.info.name()
        ))),
    }
}
