//! Helpers for classifying errors reported by clap.

use clap::{Error as ClapError, error::ErrorKind};

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// [`crate::Builder::build_config_from`] surfaces these as
/// [`crate::ArgsError::CliParsing`]; callers that print the usage text
/// themselves can use this to keep a zero exit status.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}
