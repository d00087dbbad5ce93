//! Tests for serde attribute handling.

use super::super::serde_attrs::{SerdeRenameAll, serde_rename_all};
use super::super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

fn keys(input: &DeriveInput) -> Result<Vec<String>> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(parsed.fields.into_iter().map(|field| field.key).collect())
}

#[test]
fn field_keys_follow_serde_renames() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "kebab-case")]
        struct Demo {
            instance_count: u32,
            #[serde(rename = "zone")]
            availability_zone: String,
            #[serde(rename(serialize = "ignored", deserialize = "dc"))]
            data_centre: String,
            r#type: String,
        }
    };
    let found = keys(&input)?;
    ensure!(
        found == ["instance-count", "zone", "dc", "type"],
        "unexpected keys {found:?}"
    );
    Ok(())
}

#[test]
fn skipped_fields_are_left_out() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            kept: u8,
            #[serde(skip)]
            cache: Vec<u8>,
            #[serde(skip_deserializing, default)]
            derived: u8,
        }
    };
    let found = keys(&input)?;
    ensure!(found == ["kept"], "unexpected keys {found:?}");
    Ok(())
}

#[test]
fn serde_defaults_are_recorded() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[serde(default)]
            retries: u8,
            #[serde(default = "default_host")]
            host: String,
            plain: String,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let defaults: Vec<_> = parsed
        .fields
        .iter()
        .map(|field| field.serde_default.clone())
        .collect();
    let expected_path: syn::ExprPath = parse_quote!(default_host);
    ensure!(
        defaults == [
            Some(SerdeDefault::Trait),
            Some(SerdeDefault::Function(expected_path)),
            None,
        ],
        "unexpected defaults {defaults:?}"
    );
    Ok(())
}

#[rstest]
#[case("lowercase", SerdeRenameAll::Lower)]
#[case("camelCase", SerdeRenameAll::Camel)]
#[case("SCREAMING-KEBAB-CASE", SerdeRenameAll::ScreamingKebab)]
fn rename_all_rules_parse(#[case] rule: &str, #[case] expected: SerdeRenameAll) -> Result<()> {
    let attr: syn::Attribute = parse_quote!(#[serde(rename_all = #rule)]);
    let parsed = serde_rename_all(&[attr]).map_err(|err| anyhow!(err))?;
    ensure!(parsed == Some(expected), "expected {expected:?}, got {parsed:?}");
    Ok(())
}

#[test]
fn unsupported_rename_all_is_rejected() {
    let attr: syn::Attribute = parse_quote!(#[serde(rename_all = "Title Case")]);
    let err = serde_rename_all(&[attr]).expect_err("rule should be rejected");
    assert!(err.to_string().contains("unsupported serde rename_all value"));
}
