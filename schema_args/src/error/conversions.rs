//! Conversions between external error types and `ArgsError`.

use super::ArgsError;

impl From<clap::Error> for ArgsError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}

/// Deserialization failures while constructing a record are merge errors.
impl From<serde_json::Error> for ArgsError {
    fn from(e: serde_json::Error) -> Self {
        Self::merge(e)
    }
}
