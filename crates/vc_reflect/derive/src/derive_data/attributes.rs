use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, LitStr, Path, Type};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Marker

/// `#[reflect(include)]` / `#[reflect(exclude)]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerAttr {
    #[default]
    Default,
    Include,
    Exclude,
}

impl MarkerAttr {
    fn set(&mut self, marker: Self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if *self != Self::Default {
            return Err(meta.error("`include` and `exclude` can only be used once"));
        }
        *self = marker;
        Ok(())
    }

    /// Tries to read a marker, returns `false` if `meta` is not one.
    fn parse(&mut self, meta: &ParseNestedMeta) -> syn::Result<bool> {
        if meta.path.is_ident("include") {
            self.set(Self::Include, meta)?;
        } else if meta.path.is_ident("exclude") {
            self.set(Self::Exclude, meta)?;
        } else {
            return Ok(false);
        }
        Ok(true)
    }
}

fn parse_name(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    let lit: LitStr = meta.value()?.parse()?;
    let value = lit.value();
    if value.is_empty() {
        return Err(syn::Error::new(lit.span(), "the name cannot be empty"));
    }
    if value.starts_with("::") {
        return Err(syn::Error::new(lit.span(), "paths must not start with `::`"));
    }
    Ok(lit)
}

// -----------------------------------------------------------------------------
// Property

/// `#[reflect(property(name = "...", ty = T, get = f, set = g, ...))]`
pub(crate) struct PropertyAttr {
    pub name: LitStr,
    pub ty: Type,
    pub get: Option<Expr>,
    pub set: Option<Expr>,
    pub marker: MarkerAttr,
    pub private: bool,
    pub rename: Option<LitStr>,
}

impl PropertyAttr {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let span = meta.path.span();

        let mut name = None;
        let mut ty = None;
        let mut get = None;
        let mut set = None;
        let mut marker = MarkerAttr::Default;
        let mut private = false;
        let mut rename = None;

        meta.parse_nested_meta(|inner| {
            if marker.parse(&inner)? {
                return Ok(());
            }
            if inner.path.is_ident("name") {
                name = Some(parse_name(&inner)?);
            } else if inner.path.is_ident("ty") {
                ty = Some(inner.value()?.parse::<Type>()?);
            } else if inner.path.is_ident("get") {
                get = Some(inner.value()?.parse::<Expr>()?);
            } else if inner.path.is_ident("set") {
                set = Some(inner.value()?.parse::<Expr>()?);
            } else if inner.path.is_ident("rename") {
                rename = Some(parse_name(&inner)?);
            } else if inner.path.is_ident("private") {
                private = true;
            } else {
                return Err(inner.error(
                    "expected `name`, `ty`, `get`, `set`, `rename`, `private`, `include` or `exclude`",
                ));
            }
            Ok(())
        })?;

        Ok(Self {
            name: name.ok_or_else(|| syn::Error::new(span, "a property needs `name = \"...\"`"))?,
            ty: ty.ok_or_else(|| syn::Error::new(span, "a property needs `ty = Type`"))?,
            get,
            set,
            marker,
            private,
            rename,
        })
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level `#[reflect(...)]` attributes.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<LitStr>,
    pub module: Option<LitStr>,
    pub hooks: Option<Span>,
    pub auto_register: Option<Span>,
    pub implements: Vec<Path>,
    pub properties: Vec<PropertyAttr>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("type_path") {
            self.type_path = Some(parse_name(meta)?);
        } else if meta.path.is_ident("module") {
            self.module = Some(parse_name(meta)?);
        } else if meta.path.is_ident("hooks") {
            self.hooks = Some(meta.path.span());
        } else if meta.path.is_ident("auto_register") {
            self.auto_register = Some(meta.path.span());
        } else if meta.path.is_ident("implements") {
            meta.parse_nested_meta(|inner| {
                self.implements.push(inner.path.clone());
                Ok(())
            })?;
        } else if meta.path.is_ident("property") {
            self.properties.push(PropertyAttr::parse(meta)?);
        } else {
            return Err(meta.error(
                "expected `type_path`, `module`, `hooks`, `auto_register`, `implements` or `property`",
            ));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level `#[reflect(...)]` attributes.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub marker: MarkerAttr,
    pub rename: Option<LitStr>,
    pub ignore: Option<Span>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
            }
        }

        if let Some(span) = this.ignore
            && (this.marker != MarkerAttr::Default || this.rename.is_some())
        {
            return Err(syn::Error::new(span, "an ignored field takes no other attribute"));
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if self.marker.parse(meta)? {
            return Ok(());
        }
        if meta.path.is_ident("rename") {
            self.rename = Some(parse_name(meta)?);
        } else if meta.path.is_ident("ignore") {
            self.ignore = Some(meta.path.span());
        } else {
            return Err(meta.error("expected `include`, `exclude`, `rename` or `ignore`"));
        }
        Ok(())
    }
}
