mod field_spec;
mod fields;
mod set_by_path_error;
mod soa_attrs;
mod soa_derive;
mod soa_derive_parse;

use crate::soa_array::{field_spec::FieldSpecs, fields::fields_struct, soa_attrs::SoaAttrs};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{Data, DeriveInput, parse_macro_input};

pub fn soa_array(input: TokenStream) -> TokenStream {
    let input: DeriveInput = parse_macro_input!(input);
    match soa_array_derive(input) {
        Ok(tokens) => tokens,
        Err(e) => e.into_compile_error(),
    }
    .into()
}

fn soa_array_derive(input: DeriveInput) -> Result<TokenStream2, syn::Error> {
    let DeriveInput {
        ident,
        vis,
        data,
        attrs,
        generics,
    } = input;

    if !generics.params.is_empty() || generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            generics,
            "SoaArray row types cannot be generic",
        ));
    }

    let attrs = SoaAttrs::new(&attrs)?;
    match data {
        Data::Struct(strukt) => {
            let specs = FieldSpecs::new(&ident, strukt.fields)?;
            Ok(fields_struct(ident, vis, specs, attrs))
        }
        Data::Enum(_) | Data::Union(_) => Err(syn::Error::new_spanned(
            ident,
            "SoaArray only applies to structs",
        )),
    }
}
