use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use crate::derive_data::{MarkerAttr, PropertyAttr, ReflectStruct};

fn marker_tokens(vc_reflect_path: &syn::Path, marker: MarkerAttr) -> TokenStream {
    match marker {
        MarkerAttr::Default => crate::utils::empty(),
        MarkerAttr::Include => quote! {
            .with_marker(#vc_reflect_path::info::Marker::Include)
        },
        MarkerAttr::Exclude => quote! {
            .with_marker(#vc_reflect_path::info::Marker::Exclude)
        },
    }
}

fn rename_tokens(rename: Option<&LitStr>) -> TokenStream {
    match rename {
        Some(rename) => quote!(.with_rename(#rename)),
        None => crate::utils::empty(),
    }
}

fn visibility_tokens(vc_reflect_path: &syn::Path, is_public: bool) -> TokenStream {
    if is_public {
        crate::utils::empty()
    } else {
        quote! {
            .with_visibility(#vc_reflect_path::info::Visibility::Private)
        }
    }
}

fn property_tokens(vc_reflect_path: &syn::Path, property: &PropertyAttr) -> TokenStream {
    let PropertyAttr {
        name,
        ty,
        get,
        set,
        marker,
        private,
        rename,
    } = property;

    let reflect_ = quote!(#vc_reflect_path::Reflect);
    let box_ = quote!(::std::boxed::Box);
    let option_ = quote!(::core::option::Option);

    let getter = match get {
        Some(get) => quote! {
            #option_::Some((|this: &dyn #reflect_| -> #option_<#box_<dyn #reflect_>> {
                this.downcast_ref::<Self>()
                    .map(|this| #box_::new((#get)(this)) as #box_<dyn #reflect_>)
            }) as #vc_reflect_path::info::PropertyGetter)
        },
        None => quote!(#option_::None),
    };

    let setter = match set {
        Some(set) => quote! {
            #option_::Some((|this: &mut dyn #reflect_, value: #box_<dyn #reflect_>| -> ::core::result::Result<(), #box_<dyn #reflect_>> {
                let value = value.take::<#ty>()?;
                match this.downcast_mut::<Self>() {
                    #option_::Some(this) => {
                        (#set)(this, value);
                        ::core::result::Result::Ok(())
                    }
                    #option_::None => ::core::result::Result::Err(#box_::new(value) as #box_<dyn #reflect_>),
                }
            }) as #vc_reflect_path::info::PropertySetter)
        },
        None => quote!(#option_::None),
    };

    let visibility = visibility_tokens(vc_reflect_path, !private);
    let marker = marker_tokens(vc_reflect_path, *marker);
    let rename = rename_tokens(rename.as_ref());

    quote! {
        #vc_reflect_path::info::MemberInfo::property::<#ty>(#name, #getter, #setter)
            #visibility #marker #rename
    }
}

/// Generate implementation codes for `Typed`
pub(crate) fn impl_trait_typed(info: &ReflectStruct) -> TokenStream {
    let vc_reflect_path = info.vc_reflect_path();
    let ident = info.ident();

    let fields = info.fields().iter().enumerate().map(|(index, field)| {
        let ty = field.ty;
        let name = LitStr::new(&field.ident.to_string(), field.ident.span());
        let visibility = visibility_tokens(vc_reflect_path, field.is_public);
        let marker = marker_tokens(vc_reflect_path, field.attrs.marker);
        let rename = rename_tokens(field.attrs.rename.as_ref());
        quote! {
            #vc_reflect_path::info::MemberInfo::field::<#ty>(#name, #index)
                #visibility #marker #rename
        }
    });

    let properties = info
        .attrs()
        .properties
        .iter()
        .map(|property| property_tokens(vc_reflect_path, property));

    quote! {
        impl #vc_reflect_path::info::Typed for #ident {
            fn type_info() -> &'static #vc_reflect_path::info::TypeInfo {
                static CELL: #vc_reflect_path::impls::NonGenericTypeInfoCell =
                    #vc_reflect_path::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    #vc_reflect_path::info::TypeInfo::Struct(
                        #vc_reflect_path::info::StructInfo::new::<Self>(::std::vec![
                            #(#fields,)*
                            #(#properties,)*
                        ])
                    )
                })
            }
        }
    }
}
