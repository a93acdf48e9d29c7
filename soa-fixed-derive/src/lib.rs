//! This crate provides the derive macro for soa-fixed containers.

use proc_macro::TokenStream;

mod soa_array;

#[proc_macro_derive(SoaArray, attributes(soa, soa_derive))]
pub fn derive_soa_array(input: TokenStream) -> TokenStream {
    soa_array::soa_array(input)
}
