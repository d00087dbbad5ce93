//! Argument synthesis.
//!
//! Translates analyzer descriptors into `clap::Arg`s on a caller-supplied
//! [`clap::Command`]. Every argument id is the field's dotted path, so the
//! merge engine can look values up without a side table. No argument carries
//! a default value: a field counts as supplied only when clap reports
//! [`clap::parser::ValueSource::CommandLine`] for it.

mod help;

use std::path::PathBuf;

use clap::builder::ValueRange;
use clap::{Arg, ArgAction, Command};
use heck::ToShoutySnakeCase;
use tracing::trace;

use crate::analyze::FieldDescriptor;
use crate::annotate::Arity;
use crate::coerce::ScalarParser;
use crate::inspect::Classification;
use crate::schema::ScalarKind;

/// Argument id of the base-config-file flag.
pub(crate) const CONFIG_ID: &str = "__config_file";

const DEFAULT_CONFIG_LONG: &str = "config";
const DEFAULT_CONFIG_HELP: &str = "Base configuration file (JSON, TOML or YAML)";

/// Long name and help text of the base-config-file argument.
///
/// # Examples
///
/// ```
/// use schema_args::ConfigFlag;
///
/// let flag = ConfigFlag::new("settings").help("Settings file");
/// assert_eq!(flag.long(), "settings");
/// assert_eq!(ConfigFlag::default().long(), "config");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigFlag {
    long: String,
    help: String,
}

impl ConfigFlag {
    /// Config flag registered as `--{long}` with the default help text.
    #[must_use]
    pub fn new(long: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            help: DEFAULT_CONFIG_HELP.to_owned(),
        }
    }

    /// Replace the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Long name without the leading dashes.
    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    /// Help text.
    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help
    }
}

impl Default for ConfigFlag {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_LONG)
    }
}

/// Register one argument set per descriptor plus the config-file flag.
///
/// Excluded descriptors are skipped. Positionals are registered in
/// declaration order, which clap turns into their indices.
#[must_use]
pub fn register_arguments(
    mut cmd: Command,
    descriptors: &[FieldDescriptor],
    config: &ConfigFlag,
) -> Command {
    for descriptor in descriptors.iter().filter(|d| !d.is_excluded()) {
        for arg in arguments_for(descriptor) {
            trace!(id = %arg.get_id(), "registering argument");
            cmd = cmd.arg(arg);
        }
    }
    cmd.arg(config_arg(config))
}

fn config_arg(config: &ConfigFlag) -> Arg {
    Arg::new(CONFIG_ID)
        .long(config.long().to_owned())
        .value_name("PATH")
        .help(config.help_text().to_owned())
        .action(ArgAction::Set)
        .num_args(1)
        .value_parser(clap::value_parser!(PathBuf))
}

fn arguments_for(descriptor: &FieldDescriptor) -> Vec<Arg> {
    let mut args = match descriptor.classification() {
        Classification::Bool { .. } => bool_pair(descriptor),
        Classification::Dict { .. } => dict_pair(descriptor),
        _ => vec![value_arg(descriptor)],
    };
    if let Some(heading) = &descriptor.heading {
        args = args
            .into_iter()
            .map(|arg| arg.help_heading(heading.clone()))
            .collect();
    }
    args
}

fn parser_for(descriptor: &FieldDescriptor, kind: ScalarKind) -> ScalarParser {
    ScalarParser::new(kind).with_choices(descriptor.choices().map(<[_]>::to_vec))
}

fn named(descriptor: &FieldDescriptor, id: String) -> Arg {
    let arg = Arg::new(id).long(descriptor.cli_name().to_owned());
    match descriptor.short() {
        Some(short) => arg.short(short),
        None => arg,
    }
}

fn range(arity: Arity) -> ValueRange {
    match arity {
        Arity::Exactly(n) => ValueRange::new(n..=n),
        Arity::ZeroOrOne => ValueRange::new(0..=1),
        Arity::ZeroOrMore => ValueRange::new(0..),
        Arity::OneOrMore => ValueRange::new(1..),
    }
}

/// Positionals never take zero values per occurrence; optionality is
/// expressed through `required`.
fn positional_range(arity: Arity) -> ValueRange {
    match arity {
        Arity::Exactly(n) if n > 1 => ValueRange::new(n..=n),
        Arity::Exactly(_) | Arity::ZeroOrOne => ValueRange::new(1..=1),
        Arity::ZeroOrMore | Arity::OneOrMore => ValueRange::new(1..),
    }
}

fn value_arg(descriptor: &FieldDescriptor) -> Arg {
    let class = descriptor.classification();
    let kind = class.element_type().unwrap_or(ScalarKind::Str);
    let help = help::text(descriptor);
    if let Some(arity) = descriptor.positional() {
        return Arg::new(descriptor.dest())
            .value_name(descriptor.cli_name().to_shouty_snake_case())
            .help(help)
            .action(ArgAction::Set)
            .num_args(positional_range(arity))
            .required(descriptor.is_required_positional())
            .value_parser(parser_for(descriptor, kind));
    }
    let arg = named(descriptor, descriptor.dest())
        .value_name(kind.placeholder())
        .help(help)
        .value_parser(parser_for(descriptor, kind));
    match (class, descriptor.append()) {
        (Classification::List { .. } | Classification::ListOfList { .. }, Some(arity)) => {
            arg.action(ArgAction::Append).num_args(range(arity))
        }
        (Classification::List { optional, .. }, None) => {
            let required = !descriptor.has_default() && !optional;
            arg.action(ArgAction::Set)
                .num_args(if required { 1.. } else { 0.. })
        }
        _ => arg.action(ArgAction::Set).num_args(1),
    }
}

fn bool_pair(descriptor: &FieldDescriptor) -> Vec<Arg> {
    let positive = named(descriptor, descriptor.dest())
        .help(help::text(descriptor))
        .action(ArgAction::SetTrue)
        .overrides_with(descriptor.negated_id());
    let negative = Arg::new(descriptor.negated_id())
        .long(descriptor.negated_long())
        .help(format!("Disable {}", descriptor.long_flag()))
        .action(ArgAction::SetFalse)
        .overrides_with(descriptor.dest());
    vec![positive, negative]
}

fn dict_pair(descriptor: &FieldDescriptor) -> Vec<Arg> {
    let path = named(descriptor, descriptor.dest())
        .value_name("PATH")
        .help(help::text(descriptor))
        .action(ArgAction::Set)
        .num_args(1)
        .value_parser(ScalarParser::new(ScalarKind::Path));
    let mut overrides = Arg::new(descriptor.override_id())
        .value_name("KEY.PATH:VALUE")
        .help(help::override_text(descriptor))
        .action(ArgAction::Append)
        .num_args(1);
    if let Some(name) = descriptor.override_name() {
        overrides = overrides.long(name.to_owned());
    }
    vec![path, overrides]
}

#[cfg(test)]
mod tests;
