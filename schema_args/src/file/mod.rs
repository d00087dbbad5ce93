//! Structured configuration file loading.
//!
//! [`ConfigLoader`] is the seam through which base configuration paths, the
//! `--config` file and dictionary field files are read. The default
//! [`ExtensionLoader`] picks a figment provider from the file extension and
//! extracts a JSON mapping.

mod error;
mod parser;
#[cfg(feature = "yaml")]
mod yaml;

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::ArgsResult;

pub(crate) use error::file_error;
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;

/// Loads a structured file into a top-level mapping.
///
/// Implement this to plug in a format the default loader does not cover.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use schema_args::{ArgsResult, ConfigLoader};
/// use serde_json::{Map, Value, json};
///
/// #[derive(Debug)]
/// struct Fixed;
///
/// impl ConfigLoader for Fixed {
///     fn load(&self, _path: &Path) -> ArgsResult<Map<String, Value>> {
///         let mut map = Map::new();
///         map.insert("port".into(), json!(80));
///         Ok(map)
///     }
/// }
///
/// assert_eq!(Fixed.load(Path::new("any")).map(|m| m.len()).ok(), Some(1));
/// ```
pub trait ConfigLoader: fmt::Debug + Send + Sync {
    /// Read `path` and return its top-level mapping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ArgsError::File`] when the file cannot be read,
    /// fails to parse or is not a mapping at the top level.
    fn load(&self, path: &Path) -> ArgsResult<Map<String, Value>>;
}

/// Loader dispatching on the file extension.
///
/// `.json` is always available. `.toml` requires the `toml` feature (on by
/// default) and `.yaml`/`.yml` the `yaml` feature. Files without a known
/// extension are parsed as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtensionLoader;

impl ConfigLoader for ExtensionLoader {
    fn load(&self, path: &Path) -> ArgsResult<Map<String, Value>> {
        let data = std::fs::read_to_string(path).map_err(|e| file_error(path, e))?;
        let figment = parser::parse_config_by_format(path, &data)?;
        let map: Map<String, Value> = figment.extract().map_err(|e| file_error(path, e))?;
        debug!(path = %path.display(), keys = map.len(), "loaded configuration file");
        Ok(map)
    }
}
