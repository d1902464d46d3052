//! Code generation, one module per generated trait.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod get_type_meta;
mod reflect;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

use auto_register::get_auto_register_impl;
use get_type_meta::impl_trait_get_type_meta;
use reflect::impl_trait_reflect;
use type_path::impl_trait_type_path;
use typed::impl_trait_typed;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let type_path_tokens = impl_trait_type_path(info);
    let typed_tokens = impl_trait_typed(info);
    let reflect_tokens = impl_trait_reflect(info);
    let get_type_meta_tokens = impl_trait_get_type_meta(info);
    let auto_register_tokens = get_auto_register_impl(info);

    quote! {
        #type_path_tokens

        #typed_tokens

        #reflect_tokens

        #get_type_meta_tokens

        #auto_register_tokens
    }
}
