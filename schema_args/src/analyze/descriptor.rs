//! Normalized per-field descriptors produced by the analyzer.

use serde_json::Value;

use crate::annotate::Arity;
use crate::inspect::Classification;
use crate::schema::DefaultFactory;

/// Analyzer output for one leaf field of a flattened schema.
///
/// Nested records never appear as descriptors themselves; they are expanded
/// into one descriptor per leaf with a composed `cli_name` and a dotted
/// `path`. Descriptors are immutable once analysis completes.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub(crate) path: Vec<String>,
    pub(crate) classification: Classification,
    pub(crate) cli_name: String,
    pub(crate) short: Option<char>,
    pub(crate) help: Option<String>,
    pub(crate) choices: Option<Vec<Value>>,
    pub(crate) positional: Option<Arity>,
    pub(crate) append: Option<Arity>,
    pub(crate) excluded: bool,
    pub(crate) file_loadable: bool,
    pub(crate) nested_prefix: Option<String>,
    pub(crate) override_name: Option<String>,
    pub(crate) heading: Option<String>,
    pub(crate) has_default: bool,
    pub(crate) default: Option<DefaultFactory>,
}

impl FieldDescriptor {
    /// Field keys from the root record down to this field.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Dotted field path, also used as the argument id.
    #[must_use]
    pub fn dest(&self) -> String {
        self.path.join(".")
    }

    /// Classification of the declared type.
    #[must_use]
    pub const fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Long flag name without the leading dashes.
    #[must_use]
    pub fn cli_name(&self) -> &str {
        &self.cli_name
    }

    /// Long flag including the leading dashes.
    #[must_use]
    pub fn long_flag(&self) -> String {
        format!("--{}", self.cli_name)
    }

    /// Short option, if one survived prefix suppression.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.short
    }

    /// Custom help text.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Coerced permitted values.
    #[must_use]
    pub fn choices(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    /// Positional arity when the field is consumed positionally.
    #[must_use]
    pub const fn positional(&self) -> Option<Arity> {
        self.positional
    }

    /// Per-occurrence arity when the field uses repeated occurrences.
    #[must_use]
    pub const fn append(&self) -> Option<Arity> {
        self.append
    }

    /// Whether the field is kept off the command line.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Whether `@path` values are replaced by file contents.
    #[must_use]
    pub const fn is_file_loadable(&self) -> bool {
        self.file_loadable
    }

    /// Effective prefix inherited from enclosing nested records.
    #[must_use]
    pub fn nested_prefix(&self) -> Option<&str> {
        self.nested_prefix.as_deref()
    }

    /// Override flag name for dictionary fields.
    #[must_use]
    pub fn override_name(&self) -> Option<&str> {
        self.override_name.as_deref()
    }

    /// Whether the field has a default (explicit or implicit).
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.has_default
    }

    /// Whether a positional must receive at least one value.
    pub(crate) fn is_required_positional(&self) -> bool {
        self.positional.is_some_and(|arity| {
            !self.has_default && !self.classification.is_optional() && !arity.allows_none()
        })
    }

    pub(crate) fn negated_id(&self) -> String {
        format!("{}/no", self.dest())
    }

    pub(crate) fn override_id(&self) -> String {
        format!("{}/override", self.dest())
    }

    pub(crate) fn negated_long(&self) -> String {
        format!("no-{}", self.cli_name)
    }
}
