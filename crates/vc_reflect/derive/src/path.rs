//! Paths of the items the generated code refers to.

/// Get the correct access path to the `vc_reflect` crate.
///
/// 1. Crates depending on `vc_reflect` get `::vc_reflect`.
/// 2. Crates depending on the `vc_persist` facade get `::vc_persist::reflect`.
/// 3. Anything else gets `::vc_reflect`, which needs an
///    `extern crate self as vc_reflect;` inside `vc_reflect` itself.
///
/// Reading the manifest is costly, call it once per derive.
pub(crate) fn vc_reflect() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_reflect"))
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_reflect_path: &syn::Path) -> proc_macro2::TokenStream {
    quote::quote! {
        #vc_reflect_path::__macro_exports::auto_register
    }
}
