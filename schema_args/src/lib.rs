//! Command-line interfaces derived from record schemas.
//!
//! Describe a configuration record once, either with
//! `#[derive(CliSchema)]` or by assembling a [`Schema`] by hand, and
//! `schema_args` derives the clap arguments for it, parses the command line,
//! merges the result over layered configuration sources and deserializes a
//! populated record.
//!
//! ```rust
//! use schema_args::{Builder, CliSchema};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, CliSchema)]
//! struct AppConfig {
//!     /// Deployment region.
//!     #[schema_args(short = 'r')]
//!     region: String,
//!     #[schema_args(default = 1)]
//!     instance_count: u32,
//!     #[schema_args(append)]
//!     tags: Vec<String>,
//! }
//!
//! let builder = Builder::<AppConfig>::new()?;
//! let config = builder.build_config_from(
//!     ["app", "-r", "eu-west-1", "--tags", "a", "--tags", "b"],
//!     (),
//! )?;
//! assert_eq!(config.region, "eu-west-1");
//! assert_eq!(config.instance_count, 1);
//! assert_eq!(config.tags, ["a", "b"]);
//! # Ok::<_, std::sync::Arc<schema_args::ArgsError>>(())
//! ```
//!
//! Values are resolved in this order, later sources winning: base
//! configuration layers, the file passed with `--config`, command-line
//! flags, then dictionary override instructions.

use std::sync::Arc;

use serde::de::DeserializeOwned;

pub use schema_args_macros::CliSchema;

#[doc(hidden)]
pub use clap;
#[doc(hidden)]
pub use serde_json;

mod analyze;
mod annotate;
mod builder;
mod coerce;
mod error;
mod file;
mod file_value;
mod hook;
mod inspect;
mod merge;
mod result_ext;
mod schema;
mod synth;

pub use analyze::{FieldDescriptor, FlagRegistry, analyze, analyze_with};
pub use annotate::{
    Annotation, Arity, FieldMeta, NestedPrefix, cli_append, cli_append_nargs, cli_choices,
    cli_exclude, cli_file_loadable, cli_help, cli_nested, cli_nested_with_prefix,
    cli_override_name, cli_positional, cli_positional_nargs, cli_short, combine_annotations,
};
pub use builder::{Builder, build_config, build_config_from};
pub use coerce::{ScalarParser, parse_scalar};
pub use error::{ArgsError, is_display_request};
#[cfg(feature = "yaml")]
pub use file::SaphyrYaml;
pub use file::{ConfigLoader, ExtensionLoader};
pub use file_value::{FILE_MARKER, expand_home};
pub use hook::{BuildContext, PostBuildHook};
pub use inspect::{Classification, classify};
pub use merge::{BaseConfig, BaseConfigs};
pub use result_ext::ArgsResultExt;
pub use schema::{DefaultFactory, FieldDef, ScalarKind, Schema, TypeShape};
pub use synth::{ConfigFlag, register_arguments};

/// Result type used throughout the crate; errors are shared behind an
/// [`Arc`] so they can be cloned into diagnostics cheaply.
pub type ArgsResult<T> = Result<T, Arc<ArgsError>>;

/// Record types that can be built from the command line.
///
/// Normally derived with `#[derive(CliSchema)]`, which also requires
/// `serde::Deserialize`.
pub trait CliSchema: DeserializeOwned {
    /// Schema describing the record's fields.
    fn schema() -> Schema;

    /// Adjust or validate the record once it has been constructed.
    ///
    /// The derive delegates to [`PostBuildHook::post_build`] when
    /// `#[schema_args(post_build_hook)]` is present.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the build.
    fn post_build(&mut self, ctx: &BuildContext) -> ArgsResult<()> {
        let _ = ctx;
        Ok(())
    }
}
