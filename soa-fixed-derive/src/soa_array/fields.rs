use crate::soa_array::{
    field_spec::{FieldKind, FieldSpec, FieldSpecs},
    soa_attrs::SoaAttrs,
    soa_derive::SoaDerive,
};
use proc_macro2::TokenStream;
use quote::{TokenStreamExt, format_ident, quote};
use syn::{Ident, Visibility};

// Generic parameters of the generated items are named `__SOA_N`, `__SOA_A`
// and `'__soa` so that they never capture a type or constant that a field
// type refers to.

/// The type of the storage for a field inside the container.
fn storage_ty(spec: &FieldSpec) -> TokenStream {
    let ty = &spec.ty;
    match spec.kind {
        FieldKind::Column => quote! { ::soa_fixed::Column<#ty, __SOA_N, __SOA_A> },
        FieldKind::Scalar => quote! { #ty },
    }
}

/// A place expression for a field of the row that `self` views.
fn view_place(spec: &FieldSpec) -> TokenStream {
    let ident = &spec.ident;
    match spec.kind {
        FieldKind::Column => quote! { self.soa.#ident[self.index] },
        FieldKind::Scalar => quote! { self.soa.#ident },
    }
}

/// A place expression for a field of row `index` of the container `self`.
fn row_place(spec: &FieldSpec) -> TokenStream {
    let ident = &spec.ident;
    match spec.kind {
        FieldKind::Column => quote! { self.#ident[index] },
        FieldKind::Scalar => quote! { self.#ident },
    }
}

pub fn fields_struct(ident: Ident, vis: Visibility, specs: FieldSpecs, soa_attrs: SoaAttrs) -> TokenStream {
    let SoaAttrs {
        derive:
            SoaDerive {
                array: ref derive_array,
                slices: ref derive_slices,
                slices_mut: ref derive_slices_mut,
                r#ref: ref derive_ref,
                ref_mut: ref derive_ref_mut,
            },
    } = soa_attrs;

    let array = format_ident!("{ident}Array");
    let item_ref = format_ident!("{ident}Ref");
    let item_ref_mut = format_ident!("{ident}RefMut");
    let slices = format_ident!("{ident}Slices");
    let slices_mut = format_ident!("{ident}SlicesMut");
    let drop_guard = format_ident!("{ident}MustNotImplDrop");

    let ident_all: Vec<_> = specs.all.iter().map(|spec| &spec.ident).collect();
    let vis_all: Vec<_> = specs.all.iter().map(|spec| &spec.vis).collect();
    let ty_all: Vec<_> = specs.all.iter().map(|spec| &spec.ty).collect();
    let name_all: Vec<_> = specs.all.iter().map(FieldSpec::name).collect();
    let binding_all: Vec<_> = specs.all.iter().map(FieldSpec::binding).collect();
    let storage_all: Vec<_> = specs.all.iter().map(storage_ty).collect();
    let place_all: Vec<_> = specs.all.iter().map(view_place).collect();
    let row_place_all = specs.all.iter().map(row_place);
    let kind_all = specs.all.iter().map(|spec| match spec.kind {
        FieldKind::Column => quote! { ::soa_fixed::FieldKind::Column },
        FieldKind::Scalar => quote! { ::soa_fixed::FieldKind::Scalar },
    });
    let slice_ty_all: Vec<_> = specs
        .all
        .iter()
        .map(|spec| {
            let ty = &spec.ty;
            match spec.kind {
                FieldKind::Column => quote! { [#ty; __SOA_N] },
                FieldKind::Scalar => quote! { #ty },
            }
        })
        .collect();
    let slice_get_all = specs.all.iter().map(|spec| {
        let ident = &spec.ident;
        match spec.kind {
            FieldKind::Column => quote! { self.#ident.as_array() },
            FieldKind::Scalar => quote! { &self.#ident },
        }
    });
    let slice_get_mut_all = specs.all.iter().map(|spec| {
        let ident = &spec.ident;
        match spec.kind {
            FieldKind::Column => quote! { self.#ident.as_mut_array() },
            FieldKind::Scalar => quote! { &mut self.#ident },
        }
    });

    let column_ident: Vec<_> = specs.columns().map(|spec| &spec.ident).collect();
    let column_vis: Vec<_> = specs.columns().map(|spec| &spec.vis).collect();
    let column_ty: Vec<_> = specs.columns().map(|spec| &spec.ty).collect();
    let column_mut: Vec<_> = specs.columns().map(FieldSpec::getter_mut).collect();
    let column_binding = specs.columns().map(FieldSpec::binding);

    let scalar_ident: Vec<_> = specs.scalars().map(|spec| &spec.ident).collect();
    let scalar_vis: Vec<_> = specs.scalars().map(|spec| &spec.vis).collect();
    let scalar_ty: Vec<_> = specs.scalars().map(|spec| &spec.ty).collect();
    let scalar_mut: Vec<_> = specs.scalars().map(FieldSpec::getter_mut).collect();
    let scalar_setter = specs.scalars().map(FieldSpec::setter);
    let scalar_binding = specs.scalars().map(FieldSpec::binding);

    let array_name = array.to_string();
    let array_doc = format!(
        "A fixed-size structure-of-arrays container of [`{ident}`] rows.\n\n\
         The first parameter is the number of rows, the second the alignment \
         of every column in bytes, `0` for natural alignment.\n\n\
         Generated by `#[derive(SoaArray)]`."
    );
    let ref_doc = format!("A read-only view of one row of a [`{array}`].");
    let ref_mut_doc = format!("A mutable view of one row of a [`{array}`].");
    let slices_doc = format!("Every field of a [`{array}`] borrowed at once.");
    let slices_mut_doc = format!("Every field of a [`{array}`] mutably borrowed at once.");

    let mut out = TokenStream::new();

    out.append_all(quote! {
        #derive_array
        #[doc = #array_doc]
        #[repr(C)]
        #vis struct #array<const __SOA_N: usize, const __SOA_A: usize = 0>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            #(#ident_all: #storage_all,)*
        }

        // Fields are moved out of row values one by one, which a `Drop` impl
        // on the row type would forbid.
        const _: () = {
            #[allow(dead_code)]
            trait #drop_guard {}
            #[allow(drop_bounds)]
            impl<__SoaRow: ::core::ops::Drop> #drop_guard for __SoaRow {}
            impl #drop_guard for #ident {}
        };
    });

    // Scalars of every row but the first are dropped in place.
    let drop_scalars = if scalar_ident.is_empty() {
        quote! {}
    } else {
        quote! {
            for row in rows.iter_mut().skip(1) {
                #(
                // SAFETY: Scalars of the rows after the first were not
                // read above, and `rows` is never dropped as a whole.
                unsafe { ::core::ptr::drop_in_place(&mut row.#scalar_ident) };
                )*
            }
        }
    };
    let rows_binding = if scalar_ident.is_empty() {
        quote! { rows }
    } else {
        quote! { mut rows }
    };

    out.append_all(quote! {
        #[automatically_derived]
        #[allow(dead_code)]
        impl<const __SOA_N: usize, const __SOA_A: usize> #array<__SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            /// Creates a container from one value per row.
            ///
            /// Column fields are moved into place. Scalar fields are taken
            /// from the first row, the scalars of the other rows are dropped.
            #vis fn from_rows(rows: [#ident; __SOA_N]) -> Self {
                const { ::core::assert!(__SOA_N > 0, "a container must have at least one row") };
                let #rows_binding = ::core::mem::ManuallyDrop::new(rows);
                let out = Self {
                    #(
                    #column_ident: ::soa_fixed::Column::from_fn(|i| {
                        // SAFETY: Each column value is read exactly once,
                        // and `rows` is never dropped as a whole.
                        unsafe { ::core::ptr::read(&rows[i].#column_ident) }
                    }),
                    )*
                    #(
                    // SAFETY: As above, and there is at least one row.
                    #scalar_ident: unsafe { ::core::ptr::read(&rows[0].#scalar_ident) },
                    )*
                };
                #drop_scalars
                out
            }

            #(
            #column_vis const fn #column_ident(&self) -> &[#column_ty; __SOA_N] {
                self.#column_ident.as_array()
            }

            #column_vis const fn #column_mut(&mut self) -> &mut [#column_ty; __SOA_N] {
                self.#column_ident.as_mut_array()
            }
            )*

            #(
            #scalar_vis const fn #scalar_ident(&self) -> &#scalar_ty {
                &self.#scalar_ident
            }

            #scalar_vis const fn #scalar_mut(&mut self) -> &mut #scalar_ty {
                &mut self.#scalar_ident
            }

            /// Replaces the value shared by all rows, returning the previous one.
            #scalar_vis fn #scalar_setter(&mut self, value: #scalar_ty) -> #scalar_ty {
                ::core::mem::replace(&mut self.#scalar_ident, value)
            }
            )*
        }

        #[automatically_derived]
        impl<const __SOA_N: usize, const __SOA_A: usize> ::core::convert::From<[#ident; __SOA_N]>
            for #array<__SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            fn from(rows: [#ident; __SOA_N]) -> Self {
                Self::from_rows(rows)
            }
        }
    });

    out.append_all(quote! {
        #[doc = #ref_doc]
        #vis struct #item_ref<'__soa, const __SOA_N: usize, const __SOA_A: usize = 0>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            soa: &'__soa #array<__SOA_N, __SOA_A>,
            index: usize,
        }

        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::core::marker::Copy
            for #item_ref<'__soa, __SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
        }

        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::core::clone::Clone
            for #item_ref<'__soa, __SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            fn clone(&self) -> Self {
                *self
            }
        }

        #[automatically_derived]
        #[allow(dead_code)]
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> #item_ref<'__soa, __SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            /// The index of the row.
            #vis const fn index(&self) -> usize {
                self.index
            }

            /// The container the row belongs to.
            #vis const fn container(&self) -> &'__soa #array<__SOA_N, __SOA_A> {
                self.soa
            }

            #(
            #vis_all fn #ident_all(&self) -> &'__soa #ty_all {
                &#place_all
            }
            )*
        }

        #[automatically_derived]
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::soa_fixed::WithRef
            for #item_ref<'__soa, __SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
            #array<__SOA_N, __SOA_A>: ::soa_fixed::CloneRow + ::soa_fixed::SoaArray<Item = #ident>,
        {
            type Item = #ident;

            fn with_ref<F, R>(&self, f: F) -> R
            where
                F: FnOnce(&Self::Item) -> R,
            {
                let value = ::soa_fixed::CloneRow::clone_row(self.soa, self.index);
                f(&value)
            }
        }

        ::soa_fixed::ref_derive!(#(#derive_ref),*; #ident, #item_ref);
    });

    out.append_all(quote! {
        #[doc = #ref_mut_doc]
        #vis struct #item_ref_mut<'__soa, const __SOA_N: usize, const __SOA_A: usize = 0>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            soa: &'__soa mut #array<__SOA_N, __SOA_A>,
            index: usize,
        }

        #[automatically_derived]
        #[allow(dead_code)]
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> #item_ref_mut<'__soa, __SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            /// The index of the row.
            #vis const fn index(&self) -> usize {
                self.index
            }

            /// Reborrows as a read-only view of the same row.
            #vis fn as_shared(&self) -> #item_ref<'_, __SOA_N, __SOA_A> {
                #item_ref {
                    soa: &*self.soa,
                    index: self.index,
                }
            }

            /// Converts into a read-only view of the same row.
            #vis fn into_ref(self) -> #item_ref<'__soa, __SOA_N, __SOA_A> {
                #item_ref {
                    soa: self.soa,
                    index: self.index,
                }
            }

            #(
            #vis_all fn #ident_all(&self) -> &#ty_all {
                &#place_all
            }
            )*

            #(
            #column_vis fn #column_mut(&mut self) -> &mut #column_ty {
                &mut self.soa.#column_ident[self.index]
            }
            )*

            #(
            #scalar_vis fn #scalar_mut(&mut self) -> &mut #scalar_ty {
                &mut self.soa.#scalar_ident
            }
            )*
        }

        #[automatically_derived]
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::soa_fixed::WithRef
            for #item_ref_mut<'__soa, __SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
            #array<__SOA_N, __SOA_A>: ::soa_fixed::CloneRow + ::soa_fixed::SoaArray<Item = #ident>,
        {
            type Item = #ident;

            fn with_ref<F, R>(&self, f: F) -> R
            where
                F: FnOnce(&Self::Item) -> R,
            {
                let value = ::soa_fixed::CloneRow::clone_row(&*self.soa, self.index);
                f(&value)
            }
        }

        #[automatically_derived]
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::soa_fixed::SoaRefMut
            for #item_ref_mut<'__soa, __SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            type Item = #ident;

            fn index(&self) -> usize {
                self.index
            }

            fn set(&mut self, value: Self::Item) {
                let #ident { #(#ident_all: #binding_all),* } = value;
                #(
                self.soa.#column_ident[self.index] = #column_binding;
                )*
                #(
                ::core::mem::drop(#scalar_binding);
                )*
            }
        }

        ::soa_fixed::ref_derive!(#(#derive_ref_mut),*; #ident, #item_ref_mut);
    });

    out.append_all(quote! {
        #[automatically_derived]
        impl ::soa_fixed::WithRef for #ident {
            type Item = Self;

            fn with_ref<F, R>(&self, f: F) -> R
            where
                F: FnOnce(&Self::Item) -> R,
            {
                f(self)
            }
        }
    });

    out.append_all(quote! {
        #derive_slices
        #[doc = #slices_doc]
        #[allow(dead_code)]
        #vis struct #slices<'__soa, const __SOA_N: usize> {
            #(#vis_all #ident_all: &'__soa #slice_ty_all,)*
        }

        impl<'__soa, const __SOA_N: usize> ::core::marker::Copy for #slices<'__soa, __SOA_N> {}

        impl<'__soa, const __SOA_N: usize> ::core::clone::Clone for #slices<'__soa, __SOA_N> {
            fn clone(&self) -> Self {
                *self
            }
        }

        #derive_slices_mut
        #[doc = #slices_mut_doc]
        #[allow(dead_code)]
        #vis struct #slices_mut<'__soa, const __SOA_N: usize> {
            #(#vis_all #ident_all: &'__soa mut #slice_ty_all,)*
        }
    });

    out.append_all(quote! {
        #[automatically_derived]
        impl<const __SOA_N: usize, const __SOA_A: usize> ::soa_fixed::SoaArray for #array<__SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            type Item = #ident;
            type Ref<'__soa> = #item_ref<'__soa, __SOA_N, __SOA_A> where Self: '__soa;
            type RefMut<'__soa> = #item_ref_mut<'__soa, __SOA_N, __SOA_A> where Self: '__soa;
            type Slices<'__soa> = #slices<'__soa, __SOA_N> where Self: '__soa;
            type SlicesMut<'__soa> = #slices_mut<'__soa, __SOA_N> where Self: '__soa;

            const ROWS: usize = {
                ::core::assert!(__SOA_N > 0, "a container must have at least one row");
                __SOA_N
            };
            const ALIGN: usize = __SOA_A;
            const NAME: &'static str = #array_name;
            const FIELDS: &'static [::soa_fixed::FieldInfo] = &[
                #(
                ::soa_fixed::FieldInfo {
                    name: #name_all,
                    kind: #kind_all,
                    offset: ::core::mem::offset_of!(#array<__SOA_N, __SOA_A>, #ident_all),
                    size: ::core::mem::size_of::<#storage_all>(),
                    align: ::core::mem::align_of::<#storage_all>(),
                    elem_size: ::core::mem::size_of::<#ty_all>(),
                },
                )*
            ];

            fn from_fn<F>(f: F) -> Self
            where
                F: FnMut(usize) -> Self::Item,
            {
                Self::from_rows(::core::array::from_fn(f))
            }

            fn get(&self, index: usize) -> ::core::option::Option<Self::Ref<'_>> {
                if index < __SOA_N {
                    ::core::option::Option::Some(#item_ref { soa: self, index })
                } else {
                    ::core::option::Option::None
                }
            }

            fn get_mut(&mut self, index: usize) -> ::core::option::Option<Self::RefMut<'_>> {
                if index < __SOA_N {
                    ::core::option::Option::Some(#item_ref_mut { soa: self, index })
                } else {
                    ::core::option::Option::None
                }
            }

            fn slices(&self) -> Self::Slices<'_> {
                #slices {
                    #(#ident_all: #slice_get_all,)*
                }
            }

            fn slices_mut(&mut self) -> Self::SlicesMut<'_> {
                #slices_mut {
                    #(#ident_all: #slice_get_mut_all,)*
                }
            }
        }

        #[automatically_derived]
        impl<const __SOA_N: usize, const __SOA_A: usize> ::soa_fixed::CloneRow for #array<__SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
            #(#ty_all: ::soa_fixed::CloneField<__SOA_A>,)*
        {
            fn clone_row(&self, index: usize) -> #ident {
                #ident {
                    #(
                    #ident_all: <#ty_all as ::soa_fixed::CloneField<__SOA_A>>::clone_field(&#row_place_all),
                    )*
                }
            }
        }

        #[automatically_derived]
        impl<'__soa, const __SOA_N: usize, const __SOA_A: usize> ::core::iter::IntoIterator
            for &'__soa #array<__SOA_N, __SOA_A>
        where
            ::soa_fixed::Align<__SOA_A>: ::soa_fixed::Alignment,
        {
            type Item = #item_ref<'__soa, __SOA_N, __SOA_A>;
            type IntoIter = ::soa_fixed::Iter<'__soa, #array<__SOA_N, __SOA_A>>;

            fn into_iter(self) -> Self::IntoIter {
                ::soa_fixed::SoaArray::iter(self)
            }
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{DeriveInput, parse_quote};

    fn expand(input: DeriveInput) -> String {
        let syn::Data::Struct(strukt) = input.data else {
            panic!("expected a struct");
        };
        let attrs = SoaAttrs::new(&input.attrs).unwrap();
        let specs = FieldSpecs::new(&input.ident, strukt.fields).unwrap();
        fields_struct(input.ident, input.vis, specs, attrs).to_string()
    }

    #[test]
    fn generated_items() {
        let out = expand(parse_quote! {
            #[soa_derive(Debug)]
            pub struct Entity {
                x: f64,
                #[soa(scalar)]
                description: String,
            }
        });
        for item in [
            "struct EntityArray",
            "struct EntityRef",
            "struct EntityRefMut",
            "struct EntitySlices",
            "struct EntitySlicesMut",
            "fn set_description",
            "fn x_mut",
            "ref_derive ! (Debug ; Entity , EntityRef)",
        ] {
            assert!(out.contains(item), "missing `{item}`");
        }
        assert!(!out.contains("fn set_x"));
    }

    #[test]
    fn scalar_storage_is_bare() {
        let out = expand(parse_quote! {
            struct Entity {
                x: f64,
                #[soa(scalar)]
                description: String,
            }
        });
        assert!(out.contains("Column < f64 , __SOA_N , __SOA_A >"));
        assert!(out.contains("description : String"));
        assert!(!out.contains("Column < String"));
    }

    #[test]
    fn rows_binding_without_scalars() {
        let out = expand(parse_quote! {
            struct Entity {
                x: f64,
            }
        });
        assert!(!out.contains("mut rows"));
        assert!(!out.contains("drop_in_place"));
    }

    #[test]
    fn generic_parameters_leave_field_types_alone() {
        let out = expand(parse_quote! {
            struct Tagged {
                tag: A,
                buffer: [u8; N],
            }
        });
        assert!(out.contains("Column < A , __SOA_N , __SOA_A >"));
        assert!(out.contains("Column < [u8 ; N] , __SOA_N , __SOA_A >"));
        assert!(!out.contains("const N :"));
        assert!(!out.contains("const A :"));
        assert!(!out.contains("'soa"));
    }

    #[test]
    fn row_clones_are_field_wise() {
        let out = expand(parse_quote! {
            struct Entity {
                x: f64,
                #[soa(scalar)]
                description: String,
            }
        });
        assert!(out.contains("f64 : :: soa_fixed :: CloneField < __SOA_A >"));
        assert!(out.contains("String : :: soa_fixed :: CloneField < __SOA_A >"));
        assert!(out.contains("EntityArray < __SOA_N , __SOA_A > : :: soa_fixed :: CloneRow"));
        assert!(!out.contains(":: core :: ptr :: read (& self"));
    }

    #[test]
    fn drop_impls_are_rejected() {
        let out = expand(parse_quote! {
            struct Entity {
                x: f64,
            }
        });
        assert!(out.contains("impl EntityMustNotImplDrop for Entity"));
    }
}
