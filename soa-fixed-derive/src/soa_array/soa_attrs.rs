use crate::soa_array::{soa_derive::SoaDerive, soa_derive_parse::SoaDeriveParse};

#[derive(Debug, Clone)]
pub struct SoaAttrs {
    pub derive: SoaDerive,
}

impl SoaAttrs {
    pub fn new(attributes: &[syn::Attribute]) -> Result<Self, syn::Error> {
        let mut derive_parse = SoaDeriveParse::default();
        for attr in attributes {
            let path = attr.path();
            if path.is_ident("soa_derive") {
                derive_parse.append(attr)?;
            } else if path.is_ident("soa") {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`soa` attributes mark fields as `column` or `scalar`, not the struct",
                ));
            }
        }

        Ok(Self {
            derive: derive_parse.into_derive()?,
        })
    }
}
