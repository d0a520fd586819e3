//! Code generation for `#[derive(Bind)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{WhereClause, parse_quote};

use super::crate_path;
use super::parse::{BindInput, BoundField};

/// Generate the `Bind` and `BindField` implementations for `input`.
pub(crate) fn bind_impls(input: &BindInput) -> TokenStream {
    let krate = crate_path::resolve(input.struct_attrs.crate_path.as_ref());
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let where_clause = bounded_where_clause(input, where_clause, &krate);
    let calls = input
        .fields
        .iter()
        .filter_map(|field| field_call(field, &krate));

    quote! {
        impl #impl_generics #krate::bind::Bind for #ident #ty_generics #where_clause {
            fn bind_mapping(
                &mut self,
                mapping: &#krate::Mapping,
            ) -> ::core::result::Result<(), #krate::bind::BindError> {
                #(#calls)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics #krate::bind::BindField for #ident #ty_generics #where_clause {
            fn bind_field(
                value: &#krate::Value,
                options: &#krate::bind::FieldOptions,
            ) -> ::core::result::Result<Self, #krate::coerce::CoercionError> {
                let mut record = <Self as ::core::default::Default>::default();
                #krate::bind::BindField::bind_field_in_place(&mut record, value, options)?;
                ::core::result::Result::Ok(record)
            }

            fn bind_field_in_place(
                &mut self,
                value: &#krate::Value,
                _options: &#krate::bind::FieldOptions,
            ) -> ::core::result::Result<(), #krate::coerce::CoercionError> {
                #krate::bind::bind_record(self, value)
            }
        }
    }
}

/// Generic structs need every bound field type to convert and `Self` to be
/// `Default`; non-generic structs keep their where clause unchanged.
fn bounded_where_clause(
    input: &BindInput,
    existing: Option<&WhereClause>,
    krate: &TokenStream,
) -> Option<WhereClause> {
    if input.generics.params.is_empty() {
        return existing.cloned();
    }
    let mut clause = existing.cloned().unwrap_or_else(|| parse_quote!(where));
    clause
        .predicates
        .push(parse_quote!(Self: ::core::default::Default));
    for field in input.fields.iter().filter(|f| f.key().is_some()) {
        let ty = &field.ty;
        clause
            .predicates
            .push(parse_quote!(#ty: #krate::bind::BindField));
    }
    Some(clause)
}

/// One `bind_field` call, or `None` for skipped fields.
fn field_call(field: &BoundField, krate: &TokenStream) -> Option<TokenStream> {
    let key = field.key()?;
    let member = &field.ident;
    let name = field.ident.unraw().to_string();

    let mut spec = quote! { #krate::bind::FieldSpec::new(#name, #key) };
    if let Some(default) = &field.attrs.default {
        spec = quote! { #spec.default(#default) };
    }
    let mut options = quote! { #krate::bind::FieldOptions::new() };
    let mut has_options = false;
    if let Some(separator) = &field.attrs.separator {
        options = quote! { #options.separator(#separator) };
        has_options = true;
    }
    if let Some(layout) = &field.attrs.layout {
        options = quote! { #options.layout(#layout) };
        has_options = true;
    }
    if has_options {
        spec = quote! { #spec.options(#options) };
    }

    Some(quote! {
        #krate::bind::bind_field(mapping, &#spec, &mut self.#member)?;
    })
}
