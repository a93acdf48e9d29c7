use quote::format_ident;
use std::collections::HashSet;
use syn::{Attribute, Fields, Ident, Type, Visibility};

/// Methods of the generated container and row views, inherent or from the
/// library traits, that a field accessor would shadow.
const RESERVED: &[&str] = &[
    // Container inherent methods and `SoaArray`.
    "from_rows", "from_fn", "get", "get_mut", "slices", "slices_mut", "len", "is_empty",
    "row", "row_mut", "try_row", "try_row_mut", "set_row", "copy_row", "extent", "field",
    "offset_of", "layout", "iter", "begin", "end", "cursor", "begin_mut", "end_mut",
    "cursor_mut", "try_fold",
    // `CloneRow`.
    "clone_row",
    // Row view inherent methods, `SoaRefMut` and `WithRef`.
    "index", "container", "as_shared", "into_ref", "set", "assign", "with_ref", "cloned",
    "copied", "snapshot",
];

/// How a field is stored in the generated container.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldKind {
    /// `N` values, one per row.
    Column,
    /// A single value shared by all rows.
    Scalar,
}

impl FieldKind {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self, syn::Error> {
        let mut kind = None;
        for attr in attrs {
            if !attr.path().is_ident("soa") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let parsed = if meta.path.is_ident("scalar") {
                    FieldKind::Scalar
                } else if meta.path.is_ident("column") {
                    FieldKind::Column
                } else {
                    return Err(meta.error("unknown soa attribute, expected `column` or `scalar`"));
                };
                match kind {
                    Some(previous) if previous != parsed => {
                        Err(meta.error("a field cannot be both a column and a scalar"))
                    }
                    _ => {
                        kind = Some(parsed);
                        Ok(())
                    }
                }
            })?;
        }
        Ok(kind.unwrap_or(FieldKind::Column))
    }
}

#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub ident: Ident,
    pub vis: Visibility,
    pub ty: Type,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    pub fn getter_mut(&self) -> Ident {
        format_ident!("{}_mut", self.ident)
    }

    pub fn setter(&self) -> Ident {
        format_ident!("set_{}", self.ident)
    }

    /// Local used when destructuring a row value.
    pub fn binding(&self) -> Ident {
        format_ident!("value_{}", self.ident)
    }

    /// Names of the accessors generated for this field, besides the plain
    /// getter.
    fn generated_names(&self) -> Vec<Ident> {
        match self.kind {
            FieldKind::Column => vec![self.getter_mut()],
            FieldKind::Scalar => vec![self.getter_mut(), self.setter()],
        }
    }
}

/// The validated field list of a row type, in declaration order.
#[derive(Clone, Debug)]
pub struct FieldSpecs {
    pub all: Vec<FieldSpec>,
}

impl FieldSpecs {
    pub fn new(ident: &Ident, fields: Fields) -> Result<Self, syn::Error> {
        let named = match fields {
            Fields::Named(named) => named.named,
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "SoaArray requires named fields",
                ));
            }
            Fields::Unit => Default::default(),
        };

        if named.is_empty() {
            return Err(syn::Error::new_spanned(
                ident,
                "SoaArray requires at least one field",
            ));
        }

        let mut all = Vec::with_capacity(named.len());
        let mut seen = HashSet::new();
        for field in named {
            let kind = FieldKind::from_attrs(&field.attrs)?;
            let Some(field_ident) = field.ident else {
                return Err(syn::Error::new_spanned(field.ty, "expected a named field"));
            };
            if RESERVED.iter().any(|reserved| field_ident == reserved) {
                return Err(syn::Error::new_spanned(
                    &field_ident,
                    format!("`{field_ident}` is reserved for a generated method"),
                ));
            }
            if !seen.insert(field_ident.to_string()) {
                return Err(syn::Error::new_spanned(
                    &field_ident,
                    format!("duplicate field name `{field_ident}`"),
                ));
            }
            all.push(FieldSpec {
                ident: field_ident,
                vis: field.vis,
                ty: field.ty,
                kind,
            });
        }

        if !all.iter().any(|spec| spec.kind == FieldKind::Column) {
            return Err(syn::Error::new_spanned(
                ident,
                "SoaArray requires at least one column field",
            ));
        }

        for spec in &all {
            for generated in spec.generated_names() {
                if seen.contains(&generated.to_string()) {
                    return Err(syn::Error::new_spanned(
                        &spec.ident,
                        format!(
                            "accessor `{generated}` generated for `{}` collides with a field of the same name",
                            spec.ident
                        ),
                    ));
                }
            }
        }

        Ok(Self { all })
    }

    pub fn columns(&self) -> impl Iterator<Item = &FieldSpec> + Clone {
        self.all
            .iter()
            .filter(|spec| spec.kind == FieldKind::Column)
    }

    pub fn scalars(&self) -> impl Iterator<Item = &FieldSpec> + Clone {
        self.all
            .iter()
            .filter(|spec| spec.kind == FieldKind::Scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{DeriveInput, parse_quote};

    fn specs(input: DeriveInput) -> Result<FieldSpecs, syn::Error> {
        let syn::Data::Struct(strukt) = input.data else {
            panic!("expected a struct");
        };
        FieldSpecs::new(&input.ident, strukt.fields)
    }

    #[test]
    fn columns_by_default() {
        let specs = specs(parse_quote! {
            struct Entity {
                x: f64,
                #[soa(column)]
                y: f64,
                #[soa(scalar)]
                description: String,
            }
        })
        .unwrap();
        let columns: Vec<_> = specs.columns().map(FieldSpec::name).collect();
        let scalars: Vec<_> = specs.scalars().map(FieldSpec::name).collect();
        assert_eq!(columns, ["x", "y"]);
        assert_eq!(scalars, ["description"]);
    }

    #[test]
    fn duplicate_names() {
        let error = specs(parse_quote! {
            struct Entity {
                x: f64,
                x: f32,
            }
        })
        .unwrap_err();
        assert_eq!(error.to_string(), "duplicate field name `x`");
    }

    #[test]
    fn empty_field_list() {
        assert!(specs(parse_quote! { struct Entity {} }).is_err());
        assert!(specs(parse_quote! { struct Entity; }).is_err());
    }

    #[test]
    fn reserved_names() {
        let error = specs(parse_quote! {
            struct Entity {
                index: usize,
            }
        })
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "`index` is reserved for a generated method"
        );
    }

    #[test]
    fn container_method_names() {
        for input in [
            parse_quote! { struct Entity { from_fn: u8 } },
            parse_quote! { struct Entity { len: u8 } },
            parse_quote! { struct Entity { iter: u8 } },
            parse_quote! { struct Entity { row: u8 } },
            parse_quote! { struct Entity { x: u8, cloned: u8 } },
        ] {
            assert!(specs(input).is_err());
        }
    }

    #[test]
    fn scalar_method_names() {
        let error = specs(parse_quote! {
            struct Entity {
                x: f64,
                #[soa(scalar)]
                layout: u8,
            }
        })
        .unwrap_err();
        assert_eq!(error.to_string(), "`layout` is reserved for a generated method");
    }

    #[test]
    fn scalars_only() {
        assert!(
            specs(parse_quote! {
                struct Entity {
                    #[soa(scalar)]
                    d: u8,
                }
            })
            .is_err()
        );
    }

    #[test]
    fn tuple_structs() {
        assert!(specs(parse_quote! { struct Entity(f64, f64); }).is_err());
    }

    #[test]
    fn unknown_kind() {
        let error = specs(parse_quote! {
            struct Entity {
                #[soa(row)]
                x: f64,
            }
        })
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "unknown soa attribute, expected `column` or `scalar`"
        );
    }

    #[test]
    fn conflicting_kinds() {
        assert!(
            specs(parse_quote! {
                struct Entity {
                    #[soa(column, scalar)]
                    x: f64,
                }
            })
            .is_err()
        );
    }

    #[test]
    fn accessor_collision() {
        assert!(
            specs(parse_quote! {
                struct Entity {
                    x: f64,
                    x_mut: f64,
                }
            })
            .is_err()
        );
        assert!(
            specs(parse_quote! {
                struct Entity {
                    #[soa(scalar)]
                    d: u8,
                    set_d: u8,
                }
            })
            .is_err()
        );
    }
}
