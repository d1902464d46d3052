use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(info: &ReflectStruct) -> TokenStream {
    let vc_reflect_path = info.vc_reflect_path();
    let ident = info.ident();
    let type_path = info.type_path_tokens();
    let type_name = info.type_name();

    // The default qualifier is derived from the path.
    let module_qualifier = info.attrs().module.as_ref().map(|module| {
        quote! {
            #[inline]
            fn module_qualifier() -> &'static str {
                #module
            }
        }
    });

    quote! {
        impl #vc_reflect_path::info::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(::core::module_path!())
            }

            #module_qualifier
        }
    }
}
