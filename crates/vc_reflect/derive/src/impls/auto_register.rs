use proc_macro2::TokenStream;

use crate::derive_data::ReflectStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(info: &ReflectStruct) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = info.attrs().auto_register else {
        return crate::utils::empty();
    };

    let vc_reflect_path = info.vc_reflect_path();
    let auto_register_ = crate::path::auto_register_(vc_reflect_path);
    let ident = info.ident();

    quote_spanned! { span =>
        const _: () = {
            fn __register(registry: &mut #vc_reflect_path::registry::TypeRegistry) {
                registry.register::<#ident>();
            }

            #auto_register_::inventory::submit! {
                #auto_register_::__AutoRegisterFunc(__register)
            }
        };
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectStruct) -> TokenStream {
    crate::utils::empty()
}
