//! Extraction of command-line values from parsed matches.

use std::path::Path;
use std::sync::Arc;

use clap::ArgMatches;
use clap::parser::ValueSource;
use serde_json::{Map, Value};
use tracing::trace;

use crate::analyze::FieldDescriptor;
use crate::file::ConfigLoader;
use crate::inspect::Classification;
use crate::{ArgsError, ArgsResult};

use crate::hook::BuildContext;

use super::base::to_utf8_path;
use super::paths::set_path;

pub(super) fn matches_error(id: &str, source: clap::parser::MatchesError) -> Arc<ArgsError> {
    Arc::new(ArgsError::Matches {
        id: id.to_owned(),
        source,
    })
}

/// Whether `id` was given on the command line, as opposed to absent or
/// filled from a clap default.
pub(crate) fn supplied(matches: &ArgMatches, id: &str) -> ArgsResult<bool> {
    matches
        .try_contains_id(id)
        .map_err(|source| matches_error(id, source))?;
    Ok(matches.value_source(id) == Some(ValueSource::CommandLine))
}

fn values(matches: &ArgMatches, id: &str) -> ArgsResult<Vec<Value>> {
    Ok(matches
        .try_get_many::<Value>(id)
        .map_err(|source| matches_error(id, source))?
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default())
}

fn occurrences(matches: &ArgMatches, id: &str) -> ArgsResult<Vec<Value>> {
    Ok(matches
        .try_get_occurrences::<Value>(id)
        .map_err(|source| matches_error(id, source))?
        .map(|occs| {
            occs.map(|occ| Value::Array(occ.cloned().collect()))
                .collect()
        })
        .unwrap_or_default())
}

fn single(matches: &ArgMatches, id: &str) -> ArgsResult<Option<Value>> {
    matches
        .try_get_one::<Value>(id)
        .map(|value| value.cloned())
        .map_err(|source| matches_error(id, source))
}

/// Value supplied on the command line for one descriptor, if any.
fn cli_value(
    descriptor: &FieldDescriptor,
    matches: &ArgMatches,
    loader: &dyn ConfigLoader,
    ctx: &mut BuildContext,
) -> ArgsResult<Option<Value>> {
    let id = descriptor.dest();
    match descriptor.classification() {
        Classification::Bool { .. } => {
            if supplied(matches, &descriptor.negated_id())? {
                Ok(Some(Value::Bool(false)))
            } else if supplied(matches, &id)? {
                Ok(Some(Value::Bool(true)))
            } else {
                Ok(None)
            }
        }
        _ if !supplied(matches, &id)? => Ok(None),
        Classification::Dict { .. } => {
            let Some(Value::String(raw)) = single(matches, &id)? else {
                return Ok(None);
            };
            let path = Path::new(&raw);
            let map = loader.load(path)?;
            ctx.with_file(to_utf8_path(path));
            Ok(Some(Value::Object(map)))
        }
        Classification::List { .. } => Ok(Some(Value::Array(values(matches, &id)?))),
        Classification::ListOfList { .. } => Ok(Some(Value::Array(occurrences(matches, &id)?))),
        Classification::Scalar(_) | Classification::Optional(_) | Classification::Nested(_) => {
            single(matches, &id)
        }
    }
}

/// Overwrite accumulator keys for every descriptor supplied on the command
/// line. Returns the number of fields applied.
pub(super) fn apply(
    descriptors: &[FieldDescriptor],
    matches: &ArgMatches,
    loader: &dyn ConfigLoader,
    acc: &mut Map<String, Value>,
    ctx: &mut BuildContext,
) -> ArgsResult<usize> {
    let mut applied = 0;
    for descriptor in descriptors.iter().filter(|d| !d.is_excluded()) {
        if let Some(value) = cli_value(descriptor, matches, loader, ctx)? {
            trace!(field = %descriptor.dest(), "applying command-line value");
            set_path(acc, descriptor.path(), value);
            applied += 1;
        }
    }
    Ok(applied)
}
