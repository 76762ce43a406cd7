use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Implements `json_result::AsJsonResult`, wrapping the value in a 200 "OK"
/// envelope.
#[proc_macro_derive(AsJsonResult)]
pub fn derive_as_json_result(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::json_result::AsJsonResult for #name #ty_generics #where_clause {
            fn into_json_result(self) -> ::json_result::JsonResult<Self> {
                ::json_result::JsonResult::ok(self)
            }
        }
    };

    TokenStream::from(expanded)
}
