//! Error constructors shared by file loading helpers.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use crate::ArgsError;

/// Construct an [`ArgsError::File`] for a configuration path.
pub(crate) fn file_error(
    path: &Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ArgsError> {
    ArgsError::file(path, err)
}

#[cfg(not(all(feature = "toml", feature = "yaml")))]
pub(super) fn feature_disabled(path: &Path, feature: &str) -> Arc<ArgsError> {
    file_error(
        path,
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("{feature} feature disabled: enable the '{feature}' feature to support this file format"),
        ),
    )
}
