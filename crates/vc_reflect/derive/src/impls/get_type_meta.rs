use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation codes for `GetTypeMeta`
///
/// Always registers `TypeTraitDefault`, plus one `TypeTraitCast` for each
/// trait listed in `#[reflect(implements(...))]`.
pub(crate) fn impl_trait_get_type_meta(info: &ReflectStruct) -> TokenStream {
    let vc_reflect_path = info.vc_reflect_path();
    let ident = info.ident();
    let registry_ = quote!(#vc_reflect_path::registry);
    let box_ = quote!(::std::boxed::Box);

    let casts = info.attrs().implements.iter().map(|trait_path| {
        quote! {
            meta.insert_trait::<#registry_::TypeTraitCast<dyn #trait_path>>(
                #registry_::TypeTraitCast::<dyn #trait_path>::new(|value| {
                    value
                        .downcast::<Self>()
                        .map(|value| value as #box_<dyn #trait_path>)
                }),
            );
        }
    });
    let capacity = 1 + info.attrs().implements.len();

    let dependencies = info.member_types().into_iter().map(|ty| {
        quote! {
            registry.register::<#ty>();
        }
    });

    quote! {
        impl #registry_::GetTypeMeta for #ident {
            fn get_type_meta() -> #registry_::TypeMeta {
                let mut meta = #registry_::TypeMeta::with_capacity::<Self>(#capacity);
                meta.insert_trait::<#registry_::TypeTraitDefault>(
                    <#registry_::TypeTraitDefault as #registry_::FromType<Self>>::from_type(),
                );
                #(#casts)*
                meta
            }

            fn register_dependencies(registry: &mut #registry_::TypeRegistry) {
                #(#dependencies)*
            }
        }
    }
}
