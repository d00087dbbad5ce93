//! Field metadata annotations.
//!
//! Annotations are plain data attached to a [`crate::FieldDef`]; they carry no
//! behaviour and are interpreted later by the field analyzer. Each builder
//! function returns a single-entry [`FieldMeta`], and
//! [`combine_annotations`] concatenates several of them.
//!
//! ```
//! use schema_args::{Arity, cli_append_nargs, cli_help, cli_short, combine_annotations};
//!
//! let meta = combine_annotations([
//!     cli_short('p'),
//!     cli_append_nargs(Arity::Exactly(2)),
//!     cli_help("Port mapping (HOST CONTAINER)"),
//! ]);
//! assert_eq!(meta.short(), Some('p'));
//! ```

use std::fmt;

/// Number of values consumed by one occurrence of an argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    /// Exactly `n` values.
    Exactly(usize),
    /// Zero or one value.
    ZeroOrOne,
    /// Any number of values, including none.
    ZeroOrMore,
    /// At least one value.
    OneOrMore,
}

impl Arity {
    /// Whether the arity consumes an open-ended number of values.
    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }

    /// Whether the arity accepts zero values.
    #[must_use]
    pub const fn allows_none(self) -> bool {
        matches!(self, Self::ZeroOrOne | Self::ZeroOrMore | Self::Exactly(0))
    }

    /// Whether the arity may yield more than one value.
    #[must_use]
    pub const fn is_multiple(self) -> bool {
        match self {
            Self::Exactly(n) => n > 1,
            Self::ZeroOrOne => false,
            Self::ZeroOrMore | Self::OneOrMore => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(1) => f.write_str("exactly one value"),
            Self::Exactly(n) => write!(f, "{n} values"),
            Self::ZeroOrOne => f.write_str("an optional value"),
            Self::ZeroOrMore => f.write_str("zero or more values"),
            Self::OneOrMore => f.write_str("one or more values"),
        }
    }
}

/// How a nested record's flags are prefixed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NestedPrefix {
    /// Use the kebab-cased field name.
    FieldName,
    /// Use the given prefix; an empty string flattens the nested fields.
    Explicit(String),
}

/// A single declarative annotation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Annotation {
    /// Short option letter.
    Short(char),
    /// Help text.
    Help(String),
    /// Restrict values to the listed literals.
    Choices(Vec<String>),
    /// Consume the field from positional arguments.
    Positional(Option<Arity>),
    /// Collect one entry per occurrence of the flag.
    Append(Option<Arity>),
    /// Expand a nested record into prefixed flags.
    Nested(NestedPrefix),
    /// Keep the field off the command line.
    Exclude,
    /// Allow `@path` values to be replaced by file contents.
    FileLoadable,
    /// Explicit name for a dictionary field's override flag.
    OverrideName(String),
}

/// Ordered side-table of annotations for one field.
///
/// When the same kind of annotation appears more than once the last one
/// wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldMeta(Vec<Annotation>);

impl FieldMeta {
    /// Build metadata from a list of annotations.
    #[must_use]
    pub const fn new(annotations: Vec<Annotation>) -> Self {
        Self(annotations)
    }

    /// Append all annotations from `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterate over the recorded annotations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    /// Whether no annotation has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn last_of<'a, T>(&'a self, pick: impl Fn(&'a Annotation) -> Option<T>) -> Option<T> {
        self.0.iter().rev().find_map(pick)
    }

    /// Short option letter.
    #[must_use]
    pub fn short(&self) -> Option<char> {
        self.last_of(|a| match a {
            Annotation::Short(c) => Some(*c),
            _ => None,
        })
    }

    /// Help text.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.last_of(|a| match a {
            Annotation::Help(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Permitted literal values.
    #[must_use]
    pub fn choices(&self) -> Option<&[String]> {
        self.last_of(|a| match a {
            Annotation::Choices(values) => Some(values.as_slice()),
            _ => None,
        })
    }

    /// Positional marker with its optional explicit arity.
    #[must_use]
    pub fn positional(&self) -> Option<Option<Arity>> {
        self.last_of(|a| match a {
            Annotation::Positional(arity) => Some(*arity),
            _ => None,
        })
    }

    /// Append marker with its optional per-occurrence arity.
    #[must_use]
    pub fn append(&self) -> Option<Option<Arity>> {
        self.last_of(|a| match a {
            Annotation::Append(arity) => Some(*arity),
            _ => None,
        })
    }

    /// Nested marker.
    #[must_use]
    pub fn nested(&self) -> Option<&NestedPrefix> {
        self.last_of(|a| match a {
            Annotation::Nested(prefix) => Some(prefix),
            _ => None,
        })
    }

    /// Whether the field is excluded from the command line.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.0.iter().any(|a| matches!(a, Annotation::Exclude))
    }

    /// Whether `@path` values are loaded from files.
    #[must_use]
    pub fn is_file_loadable(&self) -> bool {
        self.0.iter().any(|a| matches!(a, Annotation::FileLoadable))
    }

    /// Explicit override flag name.
    #[must_use]
    pub fn override_name(&self) -> Option<&str> {
        self.last_of(|a| match a {
            Annotation::OverrideName(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

impl From<Annotation> for FieldMeta {
    fn from(annotation: Annotation) -> Self {
        Self(vec![annotation])
    }
}

impl FromIterator<FieldMeta> for FieldMeta {
    fn from_iter<I: IntoIterator<Item = FieldMeta>>(iter: I) -> Self {
        Self(iter.into_iter().flat_map(|meta| meta.0).collect())
    }
}

/// Give the field a short option, e.g. `-n`.
#[must_use]
pub fn cli_short(short: char) -> FieldMeta {
    Annotation::Short(short).into()
}

/// Set the field's help text.
#[must_use]
pub fn cli_help(text: impl Into<String>) -> FieldMeta {
    Annotation::Help(text.into()).into()
}

/// Restrict the field to the given literal values.
#[must_use]
pub fn cli_choices<I, S>(choices: I) -> FieldMeta
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Annotation::Choices(choices.into_iter().map(Into::into).collect()).into()
}

/// Read the field from positional arguments with an inferred arity.
#[must_use]
pub fn cli_positional() -> FieldMeta {
    Annotation::Positional(None).into()
}

/// Read the field from positional arguments with an explicit arity.
#[must_use]
pub fn cli_positional_nargs(arity: Arity) -> FieldMeta {
    Annotation::Positional(Some(arity)).into()
}

/// Collect one value per occurrence of the flag.
#[must_use]
pub fn cli_append() -> FieldMeta {
    Annotation::Append(None).into()
}

/// Collect `arity` values per occurrence of the flag.
#[must_use]
pub fn cli_append_nargs(arity: Arity) -> FieldMeta {
    Annotation::Append(Some(arity)).into()
}

/// Expand a nested record using the field name as prefix.
#[must_use]
pub fn cli_nested() -> FieldMeta {
    Annotation::Nested(NestedPrefix::FieldName).into()
}

/// Expand a nested record with an explicit prefix (`""` for none).
#[must_use]
pub fn cli_nested_with_prefix(prefix: impl Into<String>) -> FieldMeta {
    Annotation::Nested(NestedPrefix::Explicit(prefix.into())).into()
}

/// Keep the field off the command line; it is still merged from base layers.
#[must_use]
pub fn cli_exclude() -> FieldMeta {
    Annotation::Exclude.into()
}

/// Replace `@path` values with the contents of the named file.
#[must_use]
pub fn cli_file_loadable() -> FieldMeta {
    Annotation::FileLoadable.into()
}

/// Name the override flag of a dictionary field explicitly.
#[must_use]
pub fn cli_override_name(name: impl Into<String>) -> FieldMeta {
    Annotation::OverrideName(name.into()).into()
}

/// Concatenate several annotation sets in order.
#[must_use]
pub fn combine_annotations<I>(parts: I) -> FieldMeta
where
    I: IntoIterator<Item = FieldMeta>,
{
    parts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn later_annotations_win() {
        let meta = combine_annotations([cli_short('a'), cli_help("one"), cli_short('b')]);
        assert_eq!(meta.short(), Some('b'));
        assert_eq!(meta.help(), Some("one"));
    }

    #[test]
    fn markers_are_detected() {
        let meta = combine_annotations([cli_exclude(), cli_file_loadable()]);
        assert!(meta.is_excluded());
        assert!(meta.is_file_loadable());
        assert!(meta.nested().is_none());
    }

    #[test]
    fn nested_prefix_modes() {
        assert_eq!(cli_nested().nested(), Some(&NestedPrefix::FieldName));
        assert_eq!(
            cli_nested_with_prefix("").nested(),
            Some(&NestedPrefix::Explicit(String::new()))
        );
    }

    #[rstest]
    #[case(Arity::Exactly(1), false, false)]
    #[case(Arity::Exactly(2), false, true)]
    #[case(Arity::ZeroOrOne, false, false)]
    #[case(Arity::ZeroOrMore, true, true)]
    #[case(Arity::OneOrMore, true, true)]
    fn arity_properties(#[case] arity: Arity, #[case] variable: bool, #[case] multiple: bool) {
        assert_eq!(arity.is_variable(), variable);
        assert_eq!(arity.is_multiple(), multiple);
    }
}
