//! Dictionary override instructions (`KEY.PATH:VALUE`).
//!
//! Overrides are applied after every other layer, as deep key-path writes
//! into the already-resolved mapping. Base layers, by contrast, replace
//! top-level keys wholesale.

use clap::ArgMatches;
use serde_json::{Map, Value};
use tracing::debug;

use crate::analyze::FieldDescriptor;
use crate::inspect::Classification;
use crate::{ArgsError, ArgsResult, ArgsResultExt};

use super::cli::{matches_error, supplied};
use super::paths::{get_path_mut, set_path};

/// A parsed override: key path and literal value.
#[derive(Debug, PartialEq)]
pub(crate) struct Override {
    pub(crate) path: Vec<String>,
    pub(crate) value: Value,
}

/// Parse a JSON literal, falling back to the raw text as a string.
fn literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Split `instruction` at its first `:` into a key path and a value.
pub(crate) fn parse(field: &str, instruction: &str) -> ArgsResult<Override> {
    let Some((key, raw)) = instruction.split_once(':') else {
        return Err(ArgsError::malformed_override(
            field,
            instruction,
            "expected KEY.PATH:VALUE",
        ));
    };
    if key.trim().is_empty() {
        return Err(ArgsError::malformed_override(field, instruction, "empty key path"));
    }
    let path: Vec<String> = key.split('.').map(ToOwned::to_owned).collect();
    if path.iter().any(String::is_empty) {
        return Err(ArgsError::malformed_override(
            field,
            instruction,
            "empty key segment",
        ));
    }
    Ok(Override {
        path,
        value: literal(raw),
    })
}

fn apply_one(
    target: &mut Map<String, Value>,
    field: &str,
    instruction: &str,
    parsed: Override,
) -> ArgsResult<()> {
    let mut current: &Map<String, Value> = target;
    for segment in parsed.path.iter().take(parsed.path.len().saturating_sub(1)) {
        match current.get(segment) {
            None => break,
            Some(Value::Object(next)) => current = next,
            Some(_) => {
                return Err(ArgsError::malformed_override(
                    field,
                    instruction,
                    format!("'{segment}' is not a mapping"),
                ));
            }
        }
    }
    set_path(target, &parsed.path, parsed.value);
    Ok(())
}

fn starting_mapping(descriptor: &FieldDescriptor) -> ArgsResult<Map<String, Value>> {
    match descriptor.default.map(|factory| factory()).transpose().into_args()? {
        Some(Value::Object(map)) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Apply every captured override for every dictionary field.
pub(super) fn apply(
    descriptors: &[FieldDescriptor],
    matches: &ArgMatches,
    acc: &mut Map<String, Value>,
) -> ArgsResult<usize> {
    let mut applied = 0;
    for descriptor in descriptors
        .iter()
        .filter(|d| !d.is_excluded() && matches!(d.classification(), Classification::Dict { .. }))
    {
        let id = descriptor.override_id();
        if !supplied(matches, &id)? {
            continue;
        }
        let field = descriptor.dest();
        let instructions: Vec<String> = matches
            .try_get_many::<String>(&id)
            .map_err(|source| matches_error(&id, source))?
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();
        let present = matches!(get_path_mut(acc, descriptor.path()), Some(Value::Object(_)));
        if !present {
            set_path(acc, descriptor.path(), Value::Object(starting_mapping(descriptor)?));
        }
        let Some(Value::Object(target)) = get_path_mut(acc, descriptor.path()) else {
            continue;
        };
        for instruction in instructions {
            let parsed = parse(&field, &instruction)?;
            debug!(field = %field, key = %parsed.path.join("."), "applying override");
            apply_one(target, &field, &instruction, parsed)?;
            applied += 1;
        }
    }
    Ok(applied)
}
