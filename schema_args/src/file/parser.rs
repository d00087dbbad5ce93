//! Format-specific parsing for configuration files.

use std::path::Path;

use figment::Figment;
#[cfg(feature = "toml")]
use figment::providers::Toml;
use figment::providers::{Format, Json};

use crate::ArgsResult;

#[cfg(not(all(feature = "toml", feature = "yaml")))]
use super::error::feature_disabled;
use super::error::file_error;
#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;

/// Parse configuration data according to the file extension.
///
/// # Errors
///
/// Returns an [`crate::ArgsError::File`] if the contents fail to parse or
/// the format's feature is disabled.
pub(super) fn parse_config_by_format(path: &Path, data: &str) -> ArgsResult<Figment> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("toml") => {
            #[cfg(feature = "toml")]
            {
                // Report syntax errors against this path before figment's own pass.
                toml::from_str::<toml::Value>(data).map_err(|e| file_error(path, e))?;
                Figment::from(Toml::string(data))
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(feature_disabled(path, "toml"));
            }
        }
        Some("yaml" | "yml") => {
            #[cfg(feature = "yaml")]
            {
                Figment::from(SaphyrYaml::string(path.to_path_buf(), data.to_owned()))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(feature_disabled(path, "yaml"));
            }
        }
        _ => {
            serde_json::from_str::<serde_json::Value>(data).map_err(|e| file_error(path, e))?;
            Figment::from(Json::string(data))
        }
    };
    Ok(figment)
}
