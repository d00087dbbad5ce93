//! Tests for `#[schema_args(...)]` parsing behaviour.

use super::super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

fn only_field(input: &DeriveInput) -> Result<FieldAttrs> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    parsed
        .fields
        .into_iter()
        .next()
        .map(|field| field.attrs)
        .ok_or_else(|| anyhow!("missing field"))
}

#[test]
fn parses_struct_and_field_attributes() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        /// Service settings.
        #[schema_args(post_build_hook, crate = "deps::schema_args")]
        struct Service {
            /// Listening port.
            #[schema_args(short = 'p', default = 8080)]
            port: u16,
            #[schema_args(help = "Model parameters", override_name = "m")]
            model: std::collections::BTreeMap<String, String>,
        }
    };

    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.ident == "Service", "unexpected ident {}", parsed.ident);
    ensure!(parsed.attrs.post_build_hook, "post_build_hook not parsed");
    ensure!(parsed.attrs.crate_path.is_some(), "crate path not parsed");
    ensure!(parsed.doc.as_deref() == Some("Service settings"), "doc not captured");

    let [port, model] = parsed.fields.as_slice() else {
        return Err(anyhow!("expected two fields"));
    };
    ensure!(port.attrs.short == Some('p'), "short not parsed");
    ensure!(port.attrs.default.is_some(), "default not parsed");
    ensure!(port.doc.as_deref() == Some("Listening port"), "field doc not captured");
    ensure!(
        model.attrs.help.as_deref() == Some("Model parameters"),
        "help not parsed"
    );
    ensure!(
        model.attrs.override_name.as_deref() == Some("m"),
        "override_name not parsed"
    );
    Ok(())
}

#[rstest]
#[case::bare(parse_quote!(#[schema_args(positional)]), None)]
#[case::exact(parse_quote!(#[schema_args(positional(nargs = 2))]), Some(NargsAttr::Exactly(2)))]
#[case::optional(parse_quote!(#[schema_args(positional(nargs = "?"))]), Some(NargsAttr::ZeroOrOne))]
#[case::any(parse_quote!(#[schema_args(positional(nargs = "*"))]), Some(NargsAttr::ZeroOrMore))]
#[case::some(parse_quote!(#[schema_args(positional(nargs = "+"))]), Some(NargsAttr::OneOrMore))]
fn parses_positional_arity(
    #[case] attr: syn::Attribute,
    #[case] expected: Option<NargsAttr>,
) -> Result<()> {
    let attrs = parse_field_attrs(&[attr]).map_err(|err| anyhow!(err))?;
    ensure!(
        attrs.positional == Some(expected),
        "expected {expected:?}, got {:?}",
        attrs.positional
    );
    Ok(())
}

#[test]
fn parses_append_and_nested_markers() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[schema_args(append(nargs = 2), nested(prefix = "db"), exclude, file_loadable)]
            env: Vec<Vec<String>>,
        }
    };
    let attrs = only_field(&input)?;
    ensure!(attrs.append == Some(Some(NargsAttr::Exactly(2))), "append not parsed");
    ensure!(
        attrs.nested == Some(NestedAttr::Prefix("db".to_owned())),
        "nested prefix not parsed"
    );
    ensure!(attrs.exclude && attrs.file_loadable, "markers not parsed");
    Ok(())
}

#[test]
fn choices_accept_mixed_literals() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[schema_args(choices("fast", 3, 1.5, 'x', true))]
            mode: String,
        }
    };
    let attrs = only_field(&input)?;
    let expected: Vec<String> = ["fast", "3", "1.5", "x", "true"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    ensure!(
        attrs.choices.as_ref() == Some(&expected),
        "unexpected choices {:?}",
        attrs.choices
    );
    Ok(())
}

#[test]
fn later_keys_overwrite_earlier_ones() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[schema_args(short = 'a')]
            #[schema_args(short = 'b')]
            name: String,
        }
    };
    let attrs = only_field(&input)?;
    ensure!(attrs.short == Some('b'), "expected last short to win");
    Ok(())
}

#[rstest]
#[case::unknown_field_key(
    parse_quote! { struct Demo { #[schema_args(shrot = 'p')] port: u16 } },
    "unknown field attribute `shrot`"
)]
#[case::unknown_struct_key(
    parse_quote! { #[schema_args(prefix = "APP")] struct Demo { port: u16 } },
    "unknown struct attribute `prefix`"
)]
#[case::bad_nargs(
    parse_quote! { struct Demo { #[schema_args(append(nargs = "many"))] tags: Vec<String> } },
    "unsupported nargs 'many'"
)]
#[case::empty_choices(
    parse_quote! { struct Demo { #[schema_args(choices())] mode: String } },
    "choices must list at least one value"
)]
#[case::short_not_char(
    parse_quote! { struct Demo { #[schema_args(short = "p")] port: u16 } },
    "short must be a character"
)]
#[case::tuple_struct(parse_quote! { struct Demo(u16); }, "CliSchema requires named fields")]
#[case::enumeration(parse_quote! { enum Demo { A } }, "CliSchema can only be derived for structs")]
#[case::generic(
    parse_quote! { struct Demo<T> { value: T } },
    "CliSchema cannot be derived for generic structs"
)]
fn rejects_invalid_input(#[case] input: DeriveInput, #[case] expected: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected parse failure"));
    };
    ensure!(
        err.to_string().contains(expected),
        "expected `{expected}` in `{err}`"
    );
    Ok(())
}

#[test]
fn doc_text_uses_first_paragraph() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        /// Number of worker
        /// threads.
        ///
        /// Ignored when running single-threaded.
        struct Demo { workers: u8 }
    };
    let doc = doc_text(&input.attrs);
    ensure!(
        doc.as_deref() == Some("Number of worker threads"),
        "unexpected doc {doc:?}"
    );
    Ok(())
}
