use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectStruct;

/// Generate implementation codes for `Reflect` and `Struct`
pub(crate) fn impl_trait_reflect(info: &ReflectStruct) -> TokenStream {
    let vc_reflect_path = info.vc_reflect_path();
    let ident = info.ident();

    let reflect_ = quote!(#vc_reflect_path::Reflect);
    let box_ = quote!(::std::boxed::Box);

    let hooks_tokens = match info.attrs().hooks {
        Some(span) => {
            let hooks_ = quote!(#vc_reflect_path::SaveHooks);
            quote_spanned! { span =>
                #[inline]
                fn prepare_save(&mut self) {
                    <Self as #hooks_>::prepare_save(self);
                }

                #[inline]
                fn post_load(&mut self, full_path: &str, file_name: &str) {
                    <Self as #hooks_>::post_load(self, full_path, file_name);
                }
            }
        }
        None => crate::utils::empty(),
    };

    let indices = 0..info.fields().len();
    let indices_mut = indices.clone();
    let field_idents = info.fields().iter().map(|field| field.ident);
    let field_idents_mut = field_idents.clone();
    let field_len = info.fields().len();

    quote! {
        impl #reflect_ for #ident {
            fn set(&mut self, value: #box_<dyn #reflect_>) -> ::core::result::Result<(), #box_<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #vc_reflect_path::info::ReflectKind {
                #vc_reflect_path::info::ReflectKind::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> #vc_reflect_path::ops::ReflectRef<'_> {
                #vc_reflect_path::ops::ReflectRef::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #vc_reflect_path::ops::ReflectMut<'_> {
                #vc_reflect_path::ops::ReflectMut::Struct(self)
            }

            #hooks_tokens
        }

        impl #vc_reflect_path::ops::Struct for #ident {
            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#field_idents as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices_mut => ::core::option::Option::Some(&mut self.#field_idents_mut as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}
