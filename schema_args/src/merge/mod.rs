//! Configuration merge engine.
//!
//! Layers are applied strictly in order, each overwriting the keys the
//! previous ones produced:
//!
//! 1. programmatic base layers, shallow per top-level key;
//! 2. the file named by the config-file flag, also shallow;
//! 3. values supplied on the command line, written at their field path;
//! 4. dictionary override instructions, applied as deep key-path writes.
//!
//! The merge depth is deliberately asymmetric: a base layer that supplies a
//! mapping replaces the previous mapping wholesale, whereas an override only
//! touches the key it names.
//!
//! [`construct`] then fills defaults, resolves file-loadable values,
//! deserializes the record and runs its post-build hook.

mod base;
mod cli;
mod defaults;
mod overrides;
pub(crate) mod paths;

use std::path::PathBuf;
use std::sync::Arc;

use clap::ArgMatches;
use serde_json::{Map, Value};
use tracing::debug;

pub use base::{BaseConfig, BaseConfigs};

use crate::analyze::FieldDescriptor;
use crate::file::ConfigLoader;
use crate::hook::BuildContext;
use crate::schema::Schema;
use crate::synth::CONFIG_ID;
use crate::{ArgsError, ArgsResult, CliSchema};

fn fold(acc: &mut Map<String, Value>, layer: Map<String, Value>) {
    acc.extend(layer);
}

/// Merge base layers, the config file and command-line values into one
/// mapping.
pub(crate) fn merge(
    descriptors: &[FieldDescriptor],
    matches: &ArgMatches,
    base_configs: &BaseConfigs,
    loader: &dyn ConfigLoader,
    ctx: &mut BuildContext,
) -> ArgsResult<Map<String, Value>> {
    let mut acc = Map::new();
    for (index, layer) in base_configs.iter().enumerate() {
        let (map, origin) = base::resolve(index, layer, loader)?;
        debug!(index, origin = ?origin, keys = map.len(), "applying base configuration layer");
        if let Some(path) = origin {
            ctx.with_file(path);
        }
        fold(&mut acc, map);
    }
    ctx.with_base_layers(base_configs.len());

    if cli::supplied(matches, CONFIG_ID)? {
        let path = matches
            .try_get_one::<PathBuf>(CONFIG_ID)
            .map_err(|source| cli::matches_error(CONFIG_ID, source))?;
        if let Some(path) = path {
            debug!(path = %path.display(), "applying configuration file");
            let map = loader.load(path)?;
            ctx.with_file(base::to_utf8_path(path));
            fold(&mut acc, map);
        }
    }

    let applied = cli::apply(descriptors, matches, loader, &mut acc, ctx)?;
    let overridden = overrides::apply(descriptors, matches, &mut acc)?;
    debug!(applied, overridden, "applied command-line values");
    if applied + overridden > 0 {
        ctx.with_cli_input();
    }
    Ok(acc)
}

/// Build the record from a merged mapping.
pub(crate) fn construct<T: CliSchema>(
    schema: &Schema,
    descriptors: &[FieldDescriptor],
    mut acc: Map<String, Value>,
    ctx: &BuildContext,
) -> ArgsResult<T> {
    defaults::fill(schema, &mut acc)?;
    crate::file_value::resolve_all(descriptors, &mut acc)?;
    let mut record: T = serde_json::from_value(Value::Object(acc))
        .map_err(|e| Arc::new(ArgsError::merge(e)))?;
    record.post_build(ctx)?;
    Ok(record)
}

#[cfg(test)]
mod tests;
