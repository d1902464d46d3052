use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarInfo, ScalarKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef, Scalar};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

macro_rules! impl_reflect_scalar {
    (
        $ty:ty, $path:expr, $name:expr, $kind:ident,
        |$this:ident| $to:expr,
        |$value:ident| $from:expr $(,)?
    ) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::$kind, |$value| {
                        let converted: Option<$ty> = $from;
                        converted.map(|v| Box::new(v) as Box<dyn Reflect>)
                    }))
                })
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Scalar);

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                let $this = self;
                ReflectRef::Scalar($to)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Scalar
            }
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::with_capacity::<Self>(1);
                meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                meta
            }
        }
    };
}

macro_rules! impl_reflect_int {
    ($($ty:ident),*) => {$(
        impl_reflect_scalar!(
            $ty, stringify!($ty), stringify!($ty), Int,
            |this| Scalar::Int(i64::from(*this)),
            |value| value.as_i64().and_then(|v| $ty::try_from(v).ok()),
        );
    )*};
}

macro_rules! impl_reflect_uint {
    ($($ty:ident),*) => {$(
        impl_reflect_scalar!(
            $ty, stringify!($ty), stringify!($ty), UInt,
            |this| Scalar::UInt(u64::from(*this)),
            |value| value.as_u64().and_then(|v| $ty::try_from(v).ok()),
        );
    )*};
}

impl_reflect_int!(i8, i16, i32, i64);
impl_reflect_uint!(u8, u16, u32, u64);

impl_reflect_scalar!(
    isize, "isize", "isize", Int,
    |this| Scalar::Int(*this as i64),
    |value| value.as_i64().and_then(|v| isize::try_from(v).ok()),
);

impl_reflect_scalar!(
    usize, "usize", "usize", UInt,
    |this| Scalar::UInt(*this as u64),
    |value| value.as_u64().and_then(|v| usize::try_from(v).ok()),
);

impl_reflect_scalar!(
    f32, "f32", "f32", Float,
    |this| Scalar::Float(f64::from(*this)),
    |value| value.as_f64().map(|v| v as f32),
);

impl_reflect_scalar!(
    f64, "f64", "f64", Float,
    |this| Scalar::Float(*this),
    |value| value.as_f64(),
);

impl_reflect_scalar!(
    bool, "bool", "bool", Bool,
    |this| Scalar::Bool(*this),
    |value| match value {
        Scalar::Bool(v) => Some(v),
        _ => None,
    },
);

impl_reflect_scalar!(
    char, "char", "char", Char,
    |this| Scalar::Char(*this),
    |value| match value {
        Scalar::Char(v) => Some(v),
        Scalar::Str(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
        _ => None,
    },
);

impl_reflect_scalar!(
    String, "alloc::string::String", "String", String,
    |this| Scalar::Str(this.as_str()),
    |value| match value {
        Scalar::Str(s) => Some(s.to_owned()),
        Scalar::Char(c) => Some(c.to_string()),
        _ => None,
    },
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ScalarKind, TypePath, Typed};
    use crate::ops::{ReflectRef, Scalar};

    #[test]
    fn type_path() {
        assert_eq!(u8::type_path(), "u8");
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::type_name(), "String");
    }

    #[test]
    fn narrowing_is_checked() {
        let info = u8::type_info().as_scalar().unwrap();
        assert_eq!(info.kind(), ScalarKind::UInt);
        assert!(info.from_scalar(Scalar::UInt(255)).is_some());
        assert!(info.from_scalar(Scalar::UInt(256)).is_none());
        assert!(info.from_scalar(Scalar::Int(-1)).is_none());

        let info = i16::type_info().as_scalar().unwrap();
        let value = info.from_scalar(Scalar::Int(-300)).unwrap();
        assert_eq!(value.take::<i16>().unwrap(), -300);
    }

    #[test]
    fn float_accepts_integers() {
        let info = f32::type_info().as_scalar().unwrap();
        let value = info.from_scalar(Scalar::UInt(3)).unwrap();
        assert_eq!(value.take::<f32>().unwrap(), 3.0);
    }

    #[test]
    fn float_from_non_finite_names() {
        let info = f64::type_info().as_scalar().unwrap();
        let value = info.from_scalar(Scalar::Str("-Infinity")).unwrap();
        assert_eq!(value.take::<f64>().unwrap(), f64::NEG_INFINITY);

        let info = f32::type_info().as_scalar().unwrap();
        let value = info.from_scalar(Scalar::Str("NaN")).unwrap();
        assert!(value.take::<f32>().unwrap().is_nan());
        assert!(info.from_scalar(Scalar::Str("nan")).is_none());
    }

    #[test]
    fn char_from_single_char_string() {
        let info = char::type_info().as_scalar().unwrap();
        assert!(info.from_scalar(Scalar::Str("x")).is_some());
        assert!(info.from_scalar(Scalar::Str("xy")).is_none());
    }

    #[test]
    fn set_rejects_other_types() {
        let mut value = 5_u32;
        assert!(value.set(Box::new(7_u32)).is_ok());
        assert_eq!(value, 7);
        assert!(value.set(Box::new(7_i32)).is_err());

        let ReflectRef::Scalar(Scalar::UInt(v)) = value.reflect_ref() else {
            panic!("expected an unsigned scalar");
        };
        assert_eq!(v, 7);
    }
}
