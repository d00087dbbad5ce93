//! Input parsing for the `CliSchema` derive macro.
//!
//! This module gathers the struct identifier, its fields and all attribute
//! metadata in one pass so macro expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::serde_attrs::{serde_default, serde_field_key, serde_rename_all, serde_skips_field};
use super::{FieldAttrs, SerdeDefault, StructAttrs, doc_text, parse_field_attrs, parse_struct_attrs};

/// One field that serde deserializes.
pub(crate) struct ParsedField {
    pub field: syn::Field,
    /// Key serde reads the field from.
    pub key: String,
    pub attrs: FieldAttrs,
    pub doc: Option<String>,
    pub serde_default: Option<SerdeDefault>,
}

/// Everything the generator needs from the user's struct.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub attrs: StructAttrs,
    pub doc: Option<String>,
    pub fields: Vec<ParsedField>,
}

/// Gathers information from the user-provided struct.
///
/// Generic structs, tuple structs, unit structs, enums and unions are
/// rejected. Fields serde skips are left out.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "CliSchema cannot be derived for generic structs",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "CliSchema requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "CliSchema can only be derived for structs",
            ));
        }
    };

    let rename_all = serde_rename_all(&input.attrs)?;
    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        if serde_skips_field(&field.attrs)? {
            continue;
        }
        fields.push(ParsedField {
            key: serde_field_key(field, rename_all)?,
            attrs: parse_field_attrs(&field.attrs)?,
            doc: doc_text(&field.attrs),
            serde_default: serde_default(&field.attrs)?,
            field: field.clone(),
        });
    }
    Ok(ParsedInput {
        ident,
        attrs,
        doc: doc_text(&input.attrs),
        fields,
    })
}
