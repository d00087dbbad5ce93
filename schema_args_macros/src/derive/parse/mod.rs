//! Parsing utilities for the `CliSchema` derive macro.
//!
//! Struct and field attributes are read from `#[schema_args(...)]`. Unlike
//! serde attributes, which are only inspected for the keys the schema needs,
//! unknown `schema_args` keys are rejected so typos fail the build.

use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Attribute, Expr, Lit, Token, parenthesized};

mod docs;
mod input;
mod literals;
mod serde_attrs;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use docs::doc_text;
pub(crate) use input::{ParsedField, ParsedInput, parse_input};
use literals::{lit_bool, lit_char, lit_str};
pub(crate) use serde_attrs::SerdeDefault;
pub(crate) use type_utils::{last_ident, list_inner, map_inner, option_inner};

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub about: Option<String>,
    pub post_build_hook: bool,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[schema_args(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `::schema_args::`.
    pub crate_path: Option<syn::Path>,
}

/// Arity written as `nargs = ...` inside `positional(...)` or `append(...)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NargsAttr {
    Exactly(usize),
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NestedAttr {
    FieldName,
    Prefix(String),
}

/// Field-level attributes recognised by `#[derive(CliSchema)]`.
///
/// Markers that take an optional arity (`positional`, `append`) are stored
/// as `Some(None)` when written bare.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub short: Option<char>,
    pub help: Option<String>,
    pub choices: Option<Vec<String>>,
    pub positional: Option<Option<NargsAttr>>,
    pub append: Option<Option<NargsAttr>>,
    pub nested: Option<NestedAttr>,
    pub exclude: bool,
    pub file_loadable: bool,
    pub override_name: Option<String>,
    pub default: Option<Expr>,
}

/// Iterate all `#[schema_args(...)]` attributes once and apply a callback.
fn parse_schema_args<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("schema_args")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, place: &str) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| "<path>".to_owned(), ToString::to_string);
    meta.error(format!("unknown {place} attribute `{key}`"))
}

/// Accept both `key` and `key = true|false`.
fn flag(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        lit_bool(meta, key)
    } else {
        Ok(true)
    }
}

fn parse_nargs(meta: &ParseNestedMeta) -> syn::Result<NargsAttr> {
    let lit = meta.value()?.parse::<Lit>()?;
    match &lit {
        Lit::Int(n) => Ok(NargsAttr::Exactly(n.base10_parse()?)),
        Lit::Str(s) => match s.value().as_str() {
            "?" => Ok(NargsAttr::ZeroOrOne),
            "*" => Ok(NargsAttr::ZeroOrMore),
            "+" => Ok(NargsAttr::OneOrMore),
            other => Err(syn::Error::new(
                s.span(),
                format!("unsupported nargs '{other}'; expected an integer, \"?\", \"*\" or \"+\""),
            )),
        },
        other => Err(syn::Error::new(
            other.span(),
            "nargs must be an integer or one of \"?\", \"*\" or \"+\"",
        )),
    }
}

/// Parses `marker` or `marker(nargs = ...)`.
fn parse_arity_marker(meta: &ParseNestedMeta) -> syn::Result<Option<NargsAttr>> {
    if !meta.input.peek(syn::token::Paren) {
        return Ok(None);
    }
    let mut nargs = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("nargs") {
            nargs = Some(parse_nargs(&nested)?);
            Ok(())
        } else {
            Err(unknown_key(&nested, "arity"))
        }
    })?;
    Ok(nargs)
}

fn parse_nested_marker(meta: &ParseNestedMeta) -> syn::Result<NestedAttr> {
    if !meta.input.peek(syn::token::Paren) {
        return Ok(NestedAttr::FieldName);
    }
    let mut out = NestedAttr::FieldName;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("prefix") {
            out = NestedAttr::Prefix(lit_str(&nested, "prefix")?.value());
            Ok(())
        } else {
            Err(unknown_key(&nested, "nested"))
        }
    })?;
    Ok(out)
}

fn choice_text(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(n) => Ok(n.base10_digits().to_owned()),
        Lit::Float(f) => Ok(f.base10_digits().to_owned()),
        Lit::Char(c) => Ok(c.value().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new(
            other.span(),
            "choices must be string, numeric, character or boolean literals",
        )),
    }
}

fn parse_choices(meta: &ParseNestedMeta) -> syn::Result<Vec<String>> {
    let content;
    parenthesized!(content in meta.input);
    let literals = content.parse_terminated(Lit::parse, Token![,])?;
    if literals.is_empty() {
        return Err(meta.error("choices must list at least one value"));
    }
    literals.iter().map(choice_text).collect()
}

/// Extracts `#[schema_args(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_schema_args(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("about") => out.about = Some(lit_str(meta, "about")?.value()),
            Some("post_build_hook") => out.post_build_hook = flag(meta, "post_build_hook")?,
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
            }
            _ => return Err(unknown_key(meta, "struct")),
        }
        Ok(())
    })?;
    Ok(out)
}

/// Applies one field attribute, rejecting unknown keys.
fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    let Some(ident) = meta.path.get_ident() else {
        return Err(unknown_key(meta, "field"));
    };
    match ident.to_string().as_str() {
        "short" => out.short = Some(lit_char(meta, "short")?),
        "help" => out.help = Some(lit_str(meta, "help")?.value()),
        "choices" => out.choices = Some(parse_choices(meta)?),
        "positional" => out.positional = Some(parse_arity_marker(meta)?),
        "append" => out.append = Some(parse_arity_marker(meta)?),
        "nested" => out.nested = Some(parse_nested_marker(meta)?),
        "exclude" => out.exclude = flag(meta, "exclude")?,
        "file_loadable" => out.file_loadable = flag(meta, "file_loadable")?,
        "override_name" => out.override_name = Some(lit_str(meta, "override_name")?.value()),
        "default" => out.default = Some(meta.value()?.parse()?),
        _ => return Err(unknown_key(meta, "field")),
    }
    Ok(())
}

/// Parses field-level `#[schema_args(...)]` attributes.
///
/// Repeated keys overwrite earlier ones, so the last occurrence wins.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_schema_args(attrs, |meta| apply_field_attr(meta, &mut out))?;
    Ok(out)
}
