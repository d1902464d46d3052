use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, Visibility};

use super::{FieldAttributes, TypeAttributes};

/// A reflected field, `#[reflect(ignore)]` fields are never collected.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub is_public: bool,
    pub attrs: FieldAttributes,
}

/// The parsed input of `#[derive(Reflect)]`.
pub(crate) struct ReflectStruct<'a> {
    vc_reflect_path: syn::Path,
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn from_derive_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "`Reflect` cannot be derived for generic types",
            ));
        }

        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new(
                input.ident.span(),
                "`Reflect` can only be derived for structs",
            ));
        };

        let named = match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "`Reflect` needs braces, write `struct Foo {}`",
                ));
            }
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "`Reflect` cannot be derived for tuple structs",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.len());
        for field in named {
            let attrs = FieldAttributes::parse(&field.attrs)?;
            if attrs.ignore.is_some() {
                continue;
            }
            let Some(ident) = field.ident.as_ref() else {
                return Err(syn::Error::new_spanned(field, "expected a named field"));
            };
            fields.push(StructField {
                ident,
                ty: &field.ty,
                is_public: matches!(field.vis, Visibility::Public(_)),
                attrs,
            });
        }

        Ok(Self {
            vc_reflect_path: crate::path::vc_reflect(),
            ident: &input.ident,
            attrs: TypeAttributes::parse(&input.attrs)?,
            fields,
        })
    }

    #[inline]
    pub fn vc_reflect_path(&self) -> &syn::Path {
        &self.vc_reflect_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// The declared types of every field and property, deduplicated by
    /// their tokens.
    pub fn member_types(&self) -> Vec<&Type> {
        let mut seen = Vec::<String>::new();
        let mut types = Vec::new();
        let all = self
            .fields
            .iter()
            .map(|field| field.ty)
            .chain(self.attrs.properties.iter().map(|property| &property.ty));
        for ty in all {
            let key = quote!(#ty).to_string();
            if !seen.contains(&key) {
                seen.push(key);
                types.push(ty);
            }
        }
        types
    }

    /// `"a::b::Foo"` for a pinned path, `module_path!() + "::Foo"` otherwise.
    pub fn type_path_tokens(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(path) => quote!(#path),
            None => {
                let ident = LitStr::new(&self.ident.to_string(), self.ident.span());
                quote! {
                    ::core::concat!(::core::module_path!(), "::", #ident)
                }
            }
        }
    }

    /// The last segment of the type path.
    pub fn type_name(&self) -> LitStr {
        match &self.attrs.type_path {
            Some(path) => {
                let value = path.value();
                let name = value.rsplit("::").next().unwrap_or(&value);
                LitStr::new(name, path.span())
            }
            None => LitStr::new(&self.ident.to_string(), self.ident.span()),
        }
    }
}
