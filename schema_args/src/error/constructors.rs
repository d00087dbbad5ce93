//! Convenience constructors for `ArgsError`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use super::ArgsError;

impl ArgsError {
    /// Construct an [`ArgsError::InvalidAnnotation`] shared behind an [`Arc`].
    #[must_use]
    pub fn invalid_annotation(field: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::InvalidAnnotation {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Construct an [`ArgsError::File`] shared behind an [`Arc`].
    ///
    /// # Examples
    ///
    /// ```
    /// use schema_args::ArgsError;
    /// use std::path::Path;
    ///
    /// let err = ArgsError::file(Path::new("app.json"), std::io::Error::other("boom"));
    /// assert!(matches!(&*err, ArgsError::File { .. }));
    /// ```
    #[must_use]
    pub fn file(path: &Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }

    /// Construct an [`ArgsError::MalformedOverride`] shared behind an [`Arc`].
    #[must_use]
    pub fn malformed_override(
        field: impl Into<String>,
        instruction: impl Into<String>,
        reason: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::MalformedOverride {
            field: field.into(),
            instruction: instruction.into(),
            reason: reason.into(),
        })
    }

    /// Construct an [`ArgsError::Validation`] shared behind an [`Arc`].
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Validation {
            key: key.into(),
            message: message.into(),
        })
    }

    /// Construct an [`ArgsError::Merge`] from a deserialization failure.
    #[must_use]
    pub const fn merge(source: serde_json::Error) -> Self {
        Self::Merge { source }
    }

    /// Wrap a base configuration load failure with its sequence position.
    ///
    /// The inner error is unwrapped from its [`Arc`] when uniquely owned and
    /// re-rendered as a file error otherwise.
    #[must_use]
    pub fn base_config_file(index: usize, source: Arc<Self>) -> Arc<Self> {
        let inner = Arc::try_unwrap(source).unwrap_or_else(|shared| Self::Validation {
            key: format!("base_configs[{index}]"),
            message: shared.to_string(),
        });
        Arc::new(Self::BaseConfigFile {
            index,
            source: Box::new(inner),
        })
    }
}
