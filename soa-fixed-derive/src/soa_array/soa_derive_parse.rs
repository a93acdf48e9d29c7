use crate::soa_array::soa_derive::{SoaDerive, SoaDeriveMask};
use quote::quote;
use syn::{Ident, Path};

/// Traits that row views implement by going through the row value.
const VIEW_TRAITS: [&str; 6] = ["Debug", "PartialEq", "Eq", "PartialOrd", "Ord", "Hash"];

/// Traits that the generated views either already have or cannot have.
const SKIPPED_FOR_VIEWS: [&str; 3] = ["Clone", "Copy", "Default"];

fn last_ident(path: &Path) -> Option<&Ident> {
    path.segments.last().map(|segment| &segment.ident)
}

fn is_one_of(path: &Path, names: &[&str]) -> bool {
    last_ident(path).is_some_and(|ident| names.iter().any(|name| ident == name))
}

#[derive(Debug, Clone, Default)]
pub struct SoaDeriveParse {
    array: Vec<Path>,
    r#ref: Vec<Path>,
    ref_mut: Vec<Path>,
    slices: Vec<Path>,
    slices_mut: Vec<Path>,
}

impl SoaDeriveParse {
    pub fn into_derive(self) -> Result<SoaDerive, syn::Error> {
        let Self {
            array,
            r#ref: reff,
            ref_mut,
            slices,
            slices_mut,
        } = self;

        let slices = slices
            .iter()
            .filter(|path| !is_one_of(path, &SKIPPED_FOR_VIEWS));
        let slices_mut = slices_mut
            .iter()
            .filter(|path| !is_one_of(path, &SKIPPED_FOR_VIEWS));

        Ok(SoaDerive {
            array: quote! {
                #[derive(#(#array),*)]
            },
            slices: quote! {
                #[derive(#(#slices),*)]
            },
            slices_mut: quote! {
                #[derive(#(#slices_mut),*)]
            },
            r#ref: view_traits(&reff)?,
            ref_mut: view_traits(&ref_mut)?,
        })
    }

    pub fn append(&mut self, attr: &syn::Attribute) -> Result<(), syn::Error> {
        let mut collected = vec![];
        let mut mask = SoaDeriveMask::new();
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("include") {
                mask = SoaDeriveMask::splat(false);
                meta.parse_nested_meta(|meta| {
                    mask.set_by_path(&meta.path, true)
                        .map_err(|e| meta.error(e))
                })?;
            } else if meta.path.is_ident("exclude") {
                meta.parse_nested_meta(|meta| {
                    mask.set_by_path(&meta.path, false)
                        .map_err(|e| meta.error(e))
                })?;
            } else {
                collected.push(meta.path);
            }
            Ok(())
        })?;

        let to_extend = mask
            .array
            .then_some(&mut self.array)
            .into_iter()
            .chain(mask.r#ref.then_some(&mut self.r#ref))
            .chain(mask.ref_mut.then_some(&mut self.ref_mut))
            .chain(mask.slices.then_some(&mut self.slices))
            .chain(mask.slices_mut.then_some(&mut self.slices_mut));

        for set in to_extend {
            set.extend(collected.iter().cloned());
        }

        Ok(())
    }
}

fn view_traits(paths: &[Path]) -> Result<Vec<Ident>, syn::Error> {
    let mut out = vec![];
    for path in paths {
        if is_one_of(path, &SKIPPED_FOR_VIEWS) {
            continue;
        }
        match last_ident(path) {
            Some(ident) if is_one_of(path, &VIEW_TRAITS) => {
                if !out.contains(ident) {
                    out.push(ident.clone());
                }
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    path,
                    format!(
                        "`{}` cannot be derived for row views, expected one of {}",
                        quote!(#path),
                        VIEW_TRAITS.join(", ")
                    ),
                ));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{Attribute, parse_quote};

    fn parse(attrs: &[Attribute]) -> Result<SoaDerive, syn::Error> {
        let mut parse = SoaDeriveParse::default();
        for attr in attrs {
            parse.append(attr)?;
        }
        parse.into_derive()
    }

    #[test]
    fn views_forward_comparisons() {
        let derive = parse(&[parse_quote!(#[soa_derive(Clone, Debug, PartialEq)])]).unwrap();
        assert_eq!(derive.r#ref, ["Debug", "PartialEq"]);
        assert_eq!(derive.ref_mut, ["Debug", "PartialEq"]);
        assert_eq!(
            derive.array.to_string(),
            quote!(#[derive(Clone, Debug, PartialEq)]).to_string()
        );
        assert_eq!(
            derive.slices.to_string(),
            quote!(#[derive(Debug, PartialEq)]).to_string()
        );
    }

    #[test]
    fn include_mask() {
        let derive = parse(&[
            parse_quote!(#[soa_derive(Debug)]),
            parse_quote!(#[soa_derive(Default, include(Array))]),
        ])
        .unwrap();
        assert_eq!(
            derive.array.to_string(),
            quote!(#[derive(Debug, Default)]).to_string()
        );
        assert_eq!(derive.r#ref, ["Debug"]);
    }

    #[test]
    fn exclude_mask() {
        let derive = parse(&[parse_quote!(#[soa_derive(Hash, exclude(Ref, SlicesMut))])]).unwrap();
        assert!(derive.r#ref.is_empty());
        assert_eq!(derive.ref_mut, ["Hash"]);
        assert_eq!(
            derive.slices_mut.to_string(),
            quote!(#[derive()]).to_string()
        );
    }

    #[test]
    fn unsupported_view_trait() {
        assert!(parse(&[parse_quote!(#[soa_derive(serde::Serialize)])]).is_err());
        assert!(parse(&[parse_quote!(#[soa_derive(serde::Serialize, include(Array))])]).is_ok());
    }

    #[test]
    fn unknown_mask_specifier() {
        let error = parse(&[parse_quote!(#[soa_derive(Debug, include(Vec))])]).unwrap_err();
        assert!(error.to_string().starts_with("unknown mask specifier `Vec`"));
    }
}
