//! Primary error enum for schema analysis and configuration building.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by schema analysis, argument synthesis and configuration
/// merging.
///
/// The first group of variants is raised while a [`crate::Builder`] is being
/// constructed, before any argument is parsed. The remaining variants are
/// raised while building a record from parsed arguments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgsError {
    /// A field's declared type cannot be mapped onto the command line.
    #[error("field '{field}' has unsupported type '{type_name}'")]
    UnsupportedType {
        /// Dotted path of the offending field.
        field: String,
        /// Rendered name of the declared type.
        type_name: String,
    },

    /// A field carries annotations that contradict each other or its type.
    #[error("invalid annotation on field '{field}': {message}")]
    InvalidAnnotation {
        /// Dotted path of the offending field.
        field: String,
        /// Explanation of the conflict.
        message: String,
    },

    /// A variable-arity positional argument is followed by another
    /// positional argument.
    #[error(
        "positional field '{variadic}' collects a variable number of values and must be the \
         last positional, but '{following}' is declared after it"
    )]
    PositionalOrder {
        /// Field that collects a variable number of values.
        variadic: String,
        /// Positional field declared after the variadic one.
        following: String,
    },

    /// Two fields resolve to the same long flag.
    #[error("long option collision on '--{flag}': '{first}' and '{second}'")]
    NameCollision {
        /// Long flag without the leading dashes.
        flag: String,
        /// Field path (or reserved owner) that claimed the flag first.
        first: String,
        /// Field path that attempted to claim it again.
        second: String,
    },

    /// Two fields resolve to the same short option.
    #[error("short option collision on '-{short}': '{first}' and '{second}'")]
    ShortCollision {
        /// Short option letter.
        short: char,
        /// Field path (or reserved owner) that claimed the option first.
        first: String,
        /// Field path that attempted to claim it again.
        second: String,
    },

    /// Error originating from a structured configuration file.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying error reported by the loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A base configuration path failed to load.
    #[error("base configuration #{index} could not be loaded: {source}")]
    BaseConfigFile {
        /// Position of the entry within the base configuration sequence.
        index: usize,
        /// Underlying file error.
        #[source]
        source: Box<Self>,
    },

    /// A base configuration entry is not a mapping.
    #[error("base configuration #{index} must be a mapping, found {found}")]
    MalformedBaseConfig {
        /// Position of the entry within the base configuration sequence.
        index: usize,
        /// Kind of value that was supplied instead.
        found: &'static str,
    },

    /// A file-loadable value named a path that could not be read.
    #[error("field '{field}' could not load '{path}': {source}")]
    FileLoadable {
        /// Dotted path of the field being resolved.
        field: String,
        /// Path after home-directory expansion.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A dictionary override instruction could not be parsed or applied.
    #[error("malformed override '{instruction}' for field '{field}': {reason}")]
    MalformedOverride {
        /// Dotted path of the dictionary field.
        field: String,
        /// The literal instruction as supplied on the command line.
        instruction: String,
        /// Why the instruction was rejected.
        reason: String,
    },

    /// Parsed matches did not contain the expected argument shape.
    #[error("failed to read argument '{id}' from parsed matches: {source}")]
    Matches {
        /// Argument identifier.
        id: String,
        /// Error reported by clap.
        #[source]
        source: clap::parser::MatchesError,
    },

    /// The merged values could not be turned into the record type.
    #[error("failed to construct configuration: {source}")]
    Merge {
        /// Deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// Error parsing command-line arguments.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Validation failure reported by a post-build hook.
    #[error("validation failed for '{key}': {message}")]
    Validation {
        /// Configuration key that failed validation.
        key: String,
        /// Human-readable explanation.
        message: String,
    },
}
