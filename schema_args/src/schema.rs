//! Declarative description of a record type.
//!
//! A [`Schema`] lists a record's fields in declaration order together with
//! their declared [`TypeShape`], their CLI annotations and an optional
//! default factory. Schemas are normally produced by
//! `#[derive(CliSchema)]`, but can be assembled by hand:
//!
//! ```
//! use schema_args::{FieldDef, Schema, TypeShape, cli_short};
//!
//! let schema = Schema::new("ServerConfig")
//!     .about("Server configuration.")
//!     .field(FieldDef::new("host", TypeShape::string()).meta(cli_short('H')))
//!     .field(FieldDef::new("port", TypeShape::uint()).default_with(|| Ok(8080.into())));
//! assert_eq!(schema.fields().len(), 2);
//! ```

use std::fmt;

use serde_json::Value;

use crate::annotate::FieldMeta;

/// Zero-argument factory producing a field's default value.
///
/// A fresh value is produced every time a record is built, so list and map
/// defaults are never shared between records.
pub type DefaultFactory = fn() -> serde_json::Result<Value>;

/// Scalar element types understood by the argument coercion layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarKind {
    /// UTF-8 text.
    Str,
    /// Signed integer accepted within `min..=max`.
    Int {
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },
    /// Unsigned integer accepted up to `max`.
    UInt {
        /// Largest accepted value.
        max: u64,
    },
    /// Finite floating point number.
    Float,
    /// A single character.
    Char,
    /// Boolean literal; only valid as a list element.
    Bool,
    /// Filesystem path, kept as text.
    Path,
}

impl ScalarKind {
    /// Any `i64`.
    pub const INT: Self = Self::Int {
        min: i64::MIN,
        max: i64::MAX,
    };

    /// Any `u64`.
    pub const UINT: Self = Self::UInt { max: u64::MAX };

    /// Signed integer of `bits` width. Widths above 64 are limited to the
    /// `i64` range.
    ///
    /// ```
    /// use schema_args::ScalarKind;
    ///
    /// assert_eq!(ScalarKind::signed(i8::BITS), ScalarKind::Int { min: -128, max: 127 });
    /// ```
    #[must_use]
    pub const fn signed(bits: u32) -> Self {
        if bits == 0 || bits >= 64 {
            return Self::INT;
        }
        Self::Int {
            min: i64::MIN >> (64 - bits),
            max: i64::MAX >> (64 - bits),
        }
    }

    /// Unsigned integer of `bits` width. Widths above 64 are limited to the
    /// `u64` range.
    #[must_use]
    pub const fn unsigned(bits: u32) -> Self {
        if bits == 0 || bits >= 64 {
            return Self::UINT;
        }
        Self::UInt {
            max: u64::MAX >> (64 - bits),
        }
    }

    /// Placeholder used for the value name in usage text.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Str => "TEXT",
            Self::Int { .. } | Self::UInt { .. } => "INT",
            Self::Float => "FLOAT",
            Self::Char => "CHAR",
            Self::Bool => "BOOL",
            Self::Path => "PATH",
        }
    }
}

/// Declared type of a schema field.
#[derive(Clone)]
pub enum TypeShape {
    /// `bool`.
    Bool,
    /// A scalar value.
    Scalar(ScalarKind),
    /// An optional wrapper around another shape.
    Option(Box<Self>),
    /// A sequence of values.
    List(Box<Self>),
    /// A key/value mapping. Key and value shapes are recorded but the mapping
    /// is treated as an opaque structured value.
    Map {
        /// Declared key type.
        key: Box<Self>,
        /// Declared value type.
        value: Box<Self>,
    },
    /// A nested record described by its own schema.
    Record(fn() -> Schema),
    /// A type with no command-line representation.
    Other(String),
}

impl TypeShape {
    /// Shape of a `String` field.
    #[must_use]
    pub const fn string() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    /// Shape of an `i64` field.
    #[must_use]
    pub const fn int() -> Self {
        Self::Scalar(ScalarKind::INT)
    }

    /// Shape of a `u64` field.
    #[must_use]
    pub const fn uint() -> Self {
        Self::Scalar(ScalarKind::UINT)
    }

    /// Shape of a floating point field.
    #[must_use]
    pub const fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    /// Shape of a path field.
    #[must_use]
    pub const fn path() -> Self {
        Self::Scalar(ScalarKind::Path)
    }

    /// Wrap `inner` as optional.
    #[must_use]
    pub fn option(inner: Self) -> Self {
        Self::Option(Box::new(inner))
    }

    /// A list of `inner`.
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// A mapping from `key` to `value`.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Human readable rendering used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Bool => "bool".to_owned(),
            Self::Scalar(kind) => format!("{kind:?}"),
            Self::Option(inner) => format!("Option<{}>", inner.type_name()),
            Self::List(inner) => format!("List<{}>", inner.type_name()),
            Self::Map { key, value } => {
                format!("Map<{}, {}>", key.type_name(), value.type_name())
            }
            Self::Record(schema) => schema().name().to_owned(),
            Self::Other(name) => name.clone(),
        }
    }
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// One field of a [`Schema`].
#[derive(Clone, Debug)]
pub struct FieldDef {
    name: String,
    shape: TypeShape,
    meta: FieldMeta,
    default: Option<DefaultFactory>,
}

impl FieldDef {
    /// Declare a field by its serialized key and shape.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            meta: FieldMeta::default(),
            default: None,
        }
    }

    /// Attach annotations. Repeated calls accumulate.
    #[must_use]
    pub fn meta(mut self, meta: FieldMeta) -> Self {
        self.meta.extend(meta);
        self
    }

    /// Provide a default through a zero-argument factory.
    #[must_use]
    pub fn default_with(mut self, factory: DefaultFactory) -> Self {
        self.default = Some(factory);
        self
    }

    /// Serialized key of the field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared shape.
    #[must_use]
    pub const fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Attached annotations.
    #[must_use]
    pub const fn annotations(&self) -> &FieldMeta {
        &self.meta
    }

    /// Default factory, if any.
    #[must_use]
    pub const fn default_factory(&self) -> Option<DefaultFactory> {
        self.default
    }
}

/// Ordered description of a record type.
#[derive(Clone, Debug)]
pub struct Schema {
    name: String,
    type_key: Option<String>,
    about: Option<String>,
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Start an empty schema named after the record type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_key: None,
            about: None,
            fields: Vec::new(),
        }
    }

    /// Identify the record type beyond its bare name, e.g. by module path.
    /// Records sharing a name but not a key may nest one another.
    #[must_use]
    pub fn type_key(mut self, key: impl Into<String>) -> Self {
        self.type_key = Some(key.into());
        self
    }

    /// Set the description shown at the top of `--help`.
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Append a field. Declaration order is significant for positionals.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Name of the record type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity used to detect a record nesting itself. Falls back to the
    /// name.
    #[must_use]
    pub fn identity(&self) -> &str {
        self.type_key.as_deref().unwrap_or(&self.name)
    }

    /// Description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}
