//! Serde attribute parsing helpers.
//!
//! The schema names fields by the keys serde reads during deserialization,
//! so the derive honours `#[serde(rename = "...")]`,
//! `#[serde(rename_all = "...")]`, field skips and field defaults.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, ExprPath, Field, LitStr, Token};

/// Supported `#[serde(rename_all = "...")]` rules for struct fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(syn::Error::new(
                value.span(),
                format!(
                    "unsupported serde rename_all value '{other}'; expected one of \
\"lowercase\", \"UPPERCASE\", \"PascalCase\", \"camelCase\", \"snake_case\", \
\"SCREAMING_SNAKE_CASE\", \"kebab-case\", or \"SCREAMING-KEBAB-CASE\""
                ),
            )),
        }
    }

    fn apply(self, field_name: &str) -> String {
        match self {
            Self::Lower => field_name.to_ascii_lowercase(),
            Self::Upper => field_name.to_ascii_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::Snake => field_name.to_snake_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
            Self::ScreamingKebab => field_name.to_shouty_kebab_case(),
        }
    }
}

/// Field-level `#[serde(default)]` forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SerdeDefault {
    /// `#[serde(default)]`: the field type's `Default`.
    Trait,
    /// `#[serde(default = "path")]`: a zero-argument function.
    Function(ExprPath),
}

/// Visit every `#[serde(...)]` entry in `attrs`.
fn for_each_serde_meta<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Parse `#[serde(rename_all = "...")]` from struct attributes.
pub(crate) fn serde_rename_all(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    let mut out = None;
    for_each_serde_meta(attrs, |meta| {
        if !meta.path.is_ident("rename_all") {
            return super::discard_unknown(meta);
        }
        if meta.input.peek(Token![=]) {
            let value = meta.value()?.parse::<LitStr>()?;
            out = Some(SerdeRenameAll::parse(&value)?);
            return Ok(());
        }
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("deserialize") {
                let value = nested.value()?.parse::<LitStr>()?;
                out = Some(SerdeRenameAll::parse(&value)?);
                return Ok(());
            }
            super::discard_unknown(&nested)
        })
    })?;
    Ok(out)
}

/// Parse `#[serde(rename = "...")]` or `rename(deserialize = "...")` from
/// field attributes.
fn serde_field_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut out = None;
    for_each_serde_meta(attrs, |meta| {
        if !meta.path.is_ident("rename") {
            return super::discard_unknown(meta);
        }
        if meta.input.peek(Token![=]) {
            out = Some(meta.value()?.parse::<LitStr>()?.value());
            return Ok(());
        }
        if !meta.input.peek(syn::token::Paren) {
            return Ok(());
        }
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("deserialize") {
                out = Some(nested.value()?.parse::<LitStr>()?.value());
                return Ok(());
            }
            super::discard_unknown(&nested)
        })
    })?;
    Ok(out)
}

/// Compute the key serde reads for `field` given an optional container-level
/// rename rule.
pub(crate) fn serde_field_key(
    field: &Field,
    rename_all: Option<SerdeRenameAll>,
) -> syn::Result<String> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
    };
    if let Some(rename) = serde_field_rename(&field.attrs)? {
        return Ok(rename);
    }
    let field_name = ident.unraw().to_string();
    Ok(rename_all.map_or_else(|| field_name.clone(), |rule| rule.apply(&field_name)))
}

/// Returns true when serde never reads the field: `skip` or
/// `skip_deserializing`.
pub(crate) fn serde_skips_field(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skipped = false;
    for_each_serde_meta(attrs, |meta| {
        if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
            skipped = true;
            return Ok(());
        }
        super::discard_unknown(meta)
    })?;
    Ok(skipped)
}

/// Returns the field's `#[serde(default)]` form, if any.
pub(crate) fn serde_default(attrs: &[Attribute]) -> syn::Result<Option<SerdeDefault>> {
    let mut out = None;
    for_each_serde_meta(attrs, |meta| {
        if !meta.path.is_ident("default") {
            return super::discard_unknown(meta);
        }
        if meta.input.peek(Token![=]) {
            let path = meta.value()?.parse::<LitStr>()?.parse::<ExprPath>()?;
            out = Some(SerdeDefault::Function(path));
        } else {
            out = Some(SerdeDefault::Trait);
        }
        Ok(())
    })?;
    Ok(out)
}
