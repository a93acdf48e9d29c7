use crate::soa_array::set_by_path_error::SetByPathError;
use proc_macro2::TokenStream as TokenStream2;
use syn::Ident;

/// Derives requested for the generated types.
///
/// The container and the slice structs hold their fields directly, so they
/// get ordinary `#[derive]` attributes. Row views hold a container reference
/// and an index, so their traits are forwarded to the row value instead.
#[derive(Debug, Clone, Default)]
pub struct SoaDerive {
    pub array: TokenStream2,
    pub slices: TokenStream2,
    pub slices_mut: TokenStream2,
    pub r#ref: Vec<Ident>,
    pub ref_mut: Vec<Ident>,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SoaDeriveMask {
    pub array: bool,
    pub r#ref: bool,
    pub ref_mut: bool,
    pub slices: bool,
    pub slices_mut: bool,
}

impl SoaDeriveMask {
    pub const fn new() -> Self {
        Self::splat(true)
    }

    pub const fn splat(value: bool) -> Self {
        Self {
            array: value,
            r#ref: value,
            ref_mut: value,
            slices: value,
            slices_mut: value,
        }
    }

    pub fn set_by_path(&mut self, path: &syn::Path, value: bool) -> Result<(), SetByPathError> {
        if path.is_ident("Array") {
            self.array = value;
        } else if path.is_ident("Ref") {
            self.r#ref = value;
        } else if path.is_ident("RefMut") {
            self.ref_mut = value;
        } else if path.is_ident("Slices") {
            self.slices = value;
        } else if path.is_ident("SlicesMut") {
            self.slices_mut = value;
        } else {
            return Err(SetByPathError {
                specifier: quote::quote!(#path).to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn set_by_path() {
        let mut mask = SoaDeriveMask::splat(false);
        mask.set_by_path(&parse_quote!(RefMut), true).unwrap();
        mask.set_by_path(&parse_quote!(Slices), true).unwrap();
        assert_eq!(
            mask,
            SoaDeriveMask {
                array: false,
                r#ref: false,
                ref_mut: true,
                slices: true,
                slices_mut: false,
            }
        );
    }

    #[test]
    fn unknown_specifier() {
        let error = SoaDeriveMask::new()
            .set_by_path(&parse_quote!(Vec), false)
            .unwrap_err();
        assert_eq!(error.specifier, "Vec");
    }
}
