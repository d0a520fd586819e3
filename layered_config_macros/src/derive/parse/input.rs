//! Input parsing for the `Bind` derive.
//!
//! Gathers the struct identifier, generics, fields and attribute metadata in
//! one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A named field together with its parsed attributes.
pub(crate) struct BoundField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

impl BoundField {
    /// Mapping key the field reads, or `None` when it is skipped.
    pub(crate) fn key(&self) -> Option<String> {
        self.attrs.resolve_key(&self.ident)
    }
}

/// Everything code generation needs to know about the deriving struct.
pub(crate) struct BindInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub struct_attrs: StructAttrs,
    pub fields: Vec<BoundField>,
}

/// Gathers information from the user-provided struct.
///
/// Enums, unions, tuple structs and unit structs are rejected.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<BindInput, syn::Error> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Bind requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Bind can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Bind requires named fields"));
        };
        fields.push(BoundField {
            ident,
            ty: field.ty.clone(),
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }

    Ok(BindInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        struct_attrs,
        fields,
    })
}
