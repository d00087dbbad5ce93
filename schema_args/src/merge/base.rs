//! Programmatic base configuration layers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};

use crate::file::ConfigLoader;
use crate::{ArgsError, ArgsResult};

/// One base configuration layer: a file to load or an in-memory mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum BaseConfig {
    /// Structured file loaded through the builder's [`ConfigLoader`].
    Path(PathBuf),
    /// Mapping supplied directly. Anything other than a JSON object is
    /// rejected when the layer is applied.
    Value(Value),
}

impl From<&str> for BaseConfig {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for BaseConfig {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for BaseConfig {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for BaseConfig {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Utf8PathBuf> for BaseConfig {
    fn from(path: Utf8PathBuf) -> Self {
        Self::Path(path.into_std_path_buf())
    }
}

impl From<&Utf8Path> for BaseConfig {
    fn from(path: &Utf8Path) -> Self {
        Self::Path(path.as_std_path().to_path_buf())
    }
}

impl From<Value> for BaseConfig {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Map<String, Value>> for BaseConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self::Value(Value::Object(map))
    }
}

/// Ordered base configuration layers; later layers win.
///
/// Converts from nothing (`()`), a single path or mapping, or a sequence of
/// entries mixing both.
///
/// # Examples
///
/// ```
/// use schema_args::{BaseConfig, BaseConfigs};
/// use serde_json::json;
///
/// let none = BaseConfigs::from(());
/// assert!(none.is_empty());
///
/// let layers = BaseConfigs::from(vec![
///     BaseConfig::from("company.json"),
///     BaseConfig::from(json!({"region": "eu-west-1"})),
/// ]);
/// assert_eq!(layers.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseConfigs(Vec<BaseConfig>);

impl BaseConfigs {
    /// No layers.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a layer above the existing ones.
    #[must_use]
    pub fn with(mut self, layer: impl Into<BaseConfig>) -> Self {
        self.0.push(layer.into());
        self
    }

    /// Layers in application order.
    pub fn iter(&self) -> impl Iterator<Item = &BaseConfig> {
        self.0.iter()
    }

    /// Number of layers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no layers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<()> for BaseConfigs {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl From<BaseConfig> for BaseConfigs {
    fn from(layer: BaseConfig) -> Self {
        Self(vec![layer])
    }
}

impl From<&str> for BaseConfigs {
    fn from(path: &str) -> Self {
        BaseConfig::from(path).into()
    }
}

impl From<String> for BaseConfigs {
    fn from(path: String) -> Self {
        BaseConfig::from(path).into()
    }
}

impl From<PathBuf> for BaseConfigs {
    fn from(path: PathBuf) -> Self {
        BaseConfig::from(path).into()
    }
}

impl From<&Path> for BaseConfigs {
    fn from(path: &Path) -> Self {
        BaseConfig::from(path).into()
    }
}

impl From<Value> for BaseConfigs {
    fn from(value: Value) -> Self {
        BaseConfig::from(value).into()
    }
}

impl From<Map<String, Value>> for BaseConfigs {
    fn from(map: Map<String, Value>) -> Self {
        BaseConfig::from(map).into()
    }
}

impl<T: Into<BaseConfig>> From<Vec<T>> for BaseConfigs {
    fn from(layers: Vec<T>) -> Self {
        Self(layers.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<BaseConfig>, const N: usize> From<[T; N]> for BaseConfigs {
    fn from(layers: [T; N]) -> Self {
        Self(layers.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<BaseConfig> for BaseConfigs {
    fn from_iter<I: IntoIterator<Item = BaseConfig>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

pub(crate) fn to_utf8_path(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .unwrap_or_else(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
}

/// Resolve layer `index` to a mapping, loading it when it names a file.
pub(super) fn resolve(
    index: usize,
    layer: &BaseConfig,
    loader: &dyn ConfigLoader,
) -> ArgsResult<(Map<String, Value>, Option<Utf8PathBuf>)> {
    match layer {
        BaseConfig::Path(path) => {
            let map = loader
                .load(path)
                .map_err(|e| ArgsError::base_config_file(index, e))?;
            Ok((map, Some(to_utf8_path(path))))
        }
        BaseConfig::Value(Value::Object(map)) => Ok((map.clone(), None)),
        BaseConfig::Value(other) => Err(Arc::new(ArgsError::MalformedBaseConfig {
            index,
            found: kind_of(other),
        })),
    }
}
