//! Flag name composition and validation.

use heck::ToKebabCase;

use crate::{ArgsError, ArgsResult};

/// Join a prefix and a name with `-`, skipping an empty prefix.
pub(super) fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else if name.is_empty() {
        prefix.to_owned()
    } else {
        format!("{prefix}-{name}")
    }
}

/// Initials of the kebab-cased segments of `name`, e.g. `model_config` to
/// `mc`.
pub(super) fn initials(name: &str) -> String {
    name.to_kebab_case()
        .split('-')
        .filter_map(|segment| segment.chars().next())
        .collect()
}

fn is_valid_long(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(['-', '_'])
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Reject long names clap cannot register cleanly.
pub(super) fn validate_long(field: &str, name: &str) -> ArgsResult<()> {
    if is_valid_long(name) {
        Ok(())
    } else {
        Err(ArgsError::invalid_annotation(
            field,
            format!("'{name}' is not a valid long flag; use ASCII letters, digits and '-'"),
        ))
    }
}

/// Explicit nested prefixes may be empty, which flattens the record.
pub(super) fn validate_prefix(field: &str, prefix: &str) -> ArgsResult<()> {
    if prefix.is_empty() {
        return Ok(());
    }
    validate_long(field, prefix)
}
