//! Tests for type introspection helpers.

use super::super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{Type, parse_quote};

#[rstest]
#[case(parse_quote!(Option<u32>))]
#[case(parse_quote!(std::option::Option<u32>))]
#[case(parse_quote!(core::option::Option<u32>))]
fn option_inner_matches_various_prefixes(#[case] ty: Type) -> Result<()> {
    let expected: Type = parse_quote!(u32);
    let inner = option_inner(&ty).ok_or_else(|| anyhow!("expected Option"))?;
    ensure!(inner == &expected, "expected {expected:?}, got {inner:?}");
    Ok(())
}

#[rstest]
#[case(parse_quote!(Vec<u8>))]
#[case(parse_quote!(std::collections::VecDeque<u8>))]
#[case(parse_quote!(HashSet<u8>))]
#[case(parse_quote!(std::collections::BTreeSet<u8>))]
fn list_inner_matches_sequences_and_sets(#[case] ty: Type) -> Result<()> {
    let expected: Type = parse_quote!(u8);
    let inner = list_inner(&ty).ok_or_else(|| anyhow!("expected a list"))?;
    ensure!(inner == &expected, "expected {expected:?}, got {inner:?}");
    Ok(())
}

#[rstest]
#[case(parse_quote!(HashMap<String, u8>))]
#[case(parse_quote!(std::collections::HashMap<String, u8, RandomState>))]
#[case(parse_quote!(BTreeMap<String, u8>))]
#[case(parse_quote!(serde_json::Map<String, u8>))]
fn map_inner_extracts_key_and_value(#[case] ty: Type) -> Result<()> {
    let (key, value) = map_inner(&ty).ok_or_else(|| anyhow!("expected a map"))?;
    let expected_key: Type = parse_quote!(String);
    let expected_value: Type = parse_quote!(u8);
    ensure!(key == &expected_key, "unexpected key {key:?}");
    ensure!(value == &expected_value, "unexpected value {value:?}");
    Ok(())
}

#[rstest]
#[case(parse_quote!(Option<u8, u8>))]
#[case(parse_quote!(Vec))]
#[case(parse_quote!((u8, u8)))]
#[case(parse_quote!(&'static str))]
fn non_wrappers_are_ignored(#[case] ty: Type) {
    assert!(option_inner(&ty).is_none());
    assert!(list_inner(&ty).is_none());
    assert!(map_inner(&ty).is_none());
}
