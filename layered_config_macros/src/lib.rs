//! Procedural macros for `layered_config`.
//!
//! `#[derive(Bind)]` generates the per-record binding function used by
//! `layered_config::Config::unmarshal`. Each named field becomes one call to
//! the runtime `bind_field` helper, in declaration order. Field behaviour is
//! tuned with `#[layered_config(...)]`:
//!
//! - `key = "name"` reads a different mapping key (default: the field name in
//!   lower case; `key = "-"` skips the field).
//! - `skip` leaves the field untouched.
//! - `default = "literal"` is parsed into the field's type when the key is
//!   absent or null.
//! - `layout = "%Y-%m-%d"` sets the timestamp layout.
//! - `separator = ";"` sets the separator used to split a string into a
//!   sequence.
//!
//! On the struct, `crate = "path"` points generated code at a renamed
//! dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `layered_config::bind::Bind` and `BindField` for a struct with
/// named fields.
#[proc_macro_derive(Bind, attributes(layered_config))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
