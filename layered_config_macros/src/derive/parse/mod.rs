//! Attribute parsing for the `Bind` derive.

use syn::ext::IdentExt;
use syn::{Attribute, LitStr, Token, parenthesized};

mod input;
mod literals;

pub(crate) use input::{BindInput, BoundField, parse_input};
use literals::lit_str;

/// Sentinel key that excludes a field from binding.
const SKIP_KEY: &str = "-";

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Bind)]`.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub key: Option<String>,
    pub skip: bool,
    pub default: Option<LitStr>,
    pub layout: Option<LitStr>,
    pub separator: Option<LitStr>,
}

impl FieldAttrs {
    /// Mapping key for `ident`, or `None` when the field is skipped.
    pub(crate) fn resolve_key(&self, ident: &syn::Ident) -> Option<String> {
        if self.skip {
            return None;
        }
        match self.key.as_deref() {
            Some(SKIP_KEY) => None,
            Some(key) if !key.is_empty() => Some(key.to_owned()),
            _ => Some(ident.unraw().to_string().to_lowercase()),
        }
    }
}

/// Iterate all `#[layered_config(...)]` attributes once and apply a callback.
fn parse_layered_config<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("layered_config")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[layered_config(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_layered_config(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            return Ok(());
        }
        discard_unknown(meta)
    })?;
    Ok(out)
}

/// Parses field-level `#[layered_config(...)]` attributes.
///
/// Recognised keys are `key`, `skip`, `default`, `layout` and `separator`.
/// Unknown keys are ignored so older macro versions accept newer attributes.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_layered_config(attrs, |meta| {
        let Some(ident) = meta.path.get_ident().map(ToString::to_string) else {
            return discard_unknown(meta);
        };
        match ident.as_str() {
            "key" => out.key = Some(lit_str(meta, "key")?.value()),
            "skip" => out.skip = true,
            "default" => out.default = Some(lit_str(meta, "default")?),
            "layout" => out.layout = Some(lit_str(meta, "layout")?),
            "separator" => {
                let sep = lit_str(meta, "separator")?;
                if sep.value().is_empty() {
                    return Err(syn::Error::new(sep.span(), "separator must not be empty"));
                }
                out.separator = Some(sep);
            }
            _ => discard_unknown(meta)?,
        }
        Ok(())
    })?;
    Ok(out)
}
