//! Builder façade tying analysis, synthesis and merging together.

use std::ffi::OsString;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use clap::{ArgMatches, Command};
use heck::ToKebabCase;
use serde_json::{Map, Value};
use tracing::debug;

use crate::analyze::{FieldDescriptor, FlagRegistry, analyze_with};
use crate::file::{ConfigLoader, ExtensionLoader};
use crate::hook::BuildContext;
use crate::merge::{self, BaseConfigs};
use crate::schema::Schema;
use crate::synth::{ConfigFlag, register_arguments};
use crate::{ArgsResult, ArgsResultExt, CliSchema};

/// Command-line builder for the record type `T`.
///
/// Construction analyzes `T`'s schema once and fails on unsupported types,
/// incompatible annotations, flag collisions and positional ordering
/// problems. The builder is immutable afterwards and can build any number
/// of records from different argument vectors.
///
/// # Examples
///
/// ```
/// use schema_args::{Builder, CliSchema};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, CliSchema)]
/// struct Server {
///     #[schema_args(short = 'p', default = 8080)]
///     port: u16,
///     debug: bool,
/// }
///
/// let builder = Builder::<Server>::new()?;
/// let server = builder.build_config_from(["server", "-p", "9000"], json!({"debug": true}))?;
/// assert_eq!(server.port, 9000);
/// assert!(server.debug);
/// # Ok::<_, std::sync::Arc<schema_args::ArgsError>>(())
/// ```
pub struct Builder<T> {
    schema: Schema,
    descriptors: Vec<FieldDescriptor>,
    config: ConfigFlag,
    description: Option<String>,
    loader: Arc<dyn ConfigLoader>,
    record: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("schema", &self.schema.name())
            .field("descriptors", &self.descriptors.len())
            .field("config", &self.config)
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

impl<T: CliSchema> Builder<T> {
    /// Analyze `T` with the default `--config` flag.
    ///
    /// # Errors
    ///
    /// Returns a schema construction error; see [`crate::ArgsError`].
    pub fn new() -> ArgsResult<Self> {
        Self::with_config_flag(ConfigFlag::default())
    }

    /// Analyze `T` with a custom config-file flag.
    ///
    /// # Errors
    ///
    /// Returns a schema construction error, including a collision between
    /// the config flag and a field's flag.
    pub fn with_config_flag(config: ConfigFlag) -> ArgsResult<Self> {
        let schema = T::schema();
        let mut registry = FlagRegistry::with_builtins();
        registry.claim_config_flag(&config)?;
        let descriptors = analyze_with(&schema, &mut registry)?;
        Ok(Self {
            schema,
            descriptors,
            config,
            description: None,
            loader: Arc::new(ExtensionLoader),
            record: PhantomData,
        })
    }

    /// Replace the description shown at the top of `--help`.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Replace the structured-file loader.
    #[must_use]
    pub fn loader(mut self, loader: impl ConfigLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Schema the builder was constructed from.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Flattened leaf descriptors in declaration order.
    #[must_use]
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// A fresh command named after the record, with every argument
    /// registered.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.schema.name().to_kebab_case());
        let about = self
            .description
            .as_deref()
            .or_else(|| self.schema.description());
        if let Some(about) = about {
            cmd = cmd.about(about.to_owned());
        }
        self.add_arguments(cmd)
    }

    /// Register every derived argument and the config-file flag on `cmd`.
    #[must_use]
    pub fn add_arguments(&self, cmd: Command) -> Command {
        register_arguments(cmd, &self.descriptors, &self.config)
    }

    /// Register arguments using a different config-file flag.
    ///
    /// # Errors
    ///
    /// Returns an error when `config` collides with a field's flag or is not
    /// a valid long name.
    pub fn add_arguments_with(&self, cmd: Command, config: &ConfigFlag) -> ArgsResult<Command> {
        let mut registry = FlagRegistry::with_builtins();
        registry.claim_config_flag(config)?;
        for descriptor in &self.descriptors {
            registry.claim_descriptor(descriptor)?;
        }
        Ok(register_arguments(cmd, &self.descriptors, config))
    }

    /// Merge base layers, the config file and command-line values without
    /// constructing the record.
    ///
    /// Defaults are not filled in; the result holds exactly what the layers
    /// supplied.
    ///
    /// # Errors
    ///
    /// Returns file, base-configuration and override errors.
    pub fn merge(
        &self,
        matches: &ArgMatches,
        base_configs: impl Into<BaseConfigs>,
    ) -> ArgsResult<Map<String, Value>> {
        let mut ctx = BuildContext::new();
        merge::merge(
            &self.descriptors,
            matches,
            &base_configs.into(),
            self.loader.as_ref(),
            &mut ctx,
        )
    }

    /// Build a record from parsed matches and base configuration layers.
    ///
    /// `matches` must come from a command prepared with
    /// [`Builder::add_arguments`] or [`Builder::command`].
    ///
    /// # Errors
    ///
    /// Returns file, base-configuration, override, deserialization and hook
    /// errors.
    pub fn build_config(
        &self,
        matches: &ArgMatches,
        base_configs: impl Into<BaseConfigs>,
    ) -> ArgsResult<T> {
        let mut ctx = BuildContext::new();
        let acc = merge::merge(
            &self.descriptors,
            matches,
            &base_configs.into(),
            self.loader.as_ref(),
            &mut ctx,
        )?;
        debug!(
            schema = self.schema.name(),
            files = ctx.loaded_files().len(),
            cli = ctx.has_cli_input(),
            "constructing record"
        );
        merge::construct(&self.schema, &self.descriptors, acc, &ctx)
    }

    /// Parse `args` (including the program name) and build a record.
    ///
    /// # Errors
    ///
    /// Parse failures and help/version requests are returned as
    /// [`crate::ArgsError::CliParsing`]; use [`crate::is_display_request`]
    /// to tell them apart. Other errors as for [`Builder::build_config`].
    pub fn build_config_from<I, S>(
        &self,
        args: I,
        base_configs: impl Into<BaseConfigs>,
    ) -> ArgsResult<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args).into_args()?;
        self.build_config(&matches, base_configs)
    }
}

/// Build `T` from the process arguments.
///
/// Parse failures and `--help` are handled natively by clap, which prints
/// usage and exits.
///
/// # Errors
///
/// Returns schema construction errors and the errors of
/// [`Builder::build_config`].
pub fn build_config<T: CliSchema>(base_configs: impl Into<BaseConfigs>) -> ArgsResult<T> {
    let builder = Builder::<T>::new()?;
    let matches = builder.command().get_matches();
    builder.build_config(&matches, base_configs)
}

/// Build `T` from an explicit argument vector.
///
/// # Errors
///
/// See [`Builder::build_config_from`].
pub fn build_config_from<T, I, S>(args: I, base_configs: impl Into<BaseConfigs>) -> ArgsResult<T>
where
    T: CliSchema,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    Builder::<T>::new()?.build_config_from(args, base_configs)
}
