//! Type inspection.
//!
//! [`classify`] maps a declared [`TypeShape`] onto the closed set of
//! [`Classification`]s the synthesizer and merge engine know how to handle.
//! Only one level of `Option` is unwrapped; anything without a command-line
//! representation is rejected with the offending field named.

use std::sync::Arc;

use crate::schema::{ScalarKind, Schema, TypeShape};
use crate::{ArgsError, ArgsResult};

/// Category of a field, driving argument generation and merging.
#[derive(Clone, Copy)]
pub enum Classification {
    /// A required or defaulted scalar.
    Scalar(ScalarKind),
    /// An optional scalar.
    Optional(ScalarKind),
    /// A boolean switch, generated as a `--flag`/`--no-flag` pair.
    Bool {
        /// Whether the declared type was `Option<bool>`.
        optional: bool,
    },
    /// A list of scalars.
    List {
        /// Element type.
        element: ScalarKind,
        /// Whether the list was wrapped in `Option`.
        optional: bool,
    },
    /// A list of scalar lists, only produced by repeated flag occurrences.
    ListOfList {
        /// Element type of the inner lists.
        element: ScalarKind,
        /// Whether the outer list was wrapped in `Option`.
        optional: bool,
    },
    /// An opaque mapping loaded from a file and patched by overrides.
    Dict {
        /// Whether the mapping was wrapped in `Option`.
        optional: bool,
    },
    /// A nested record expanded into prefixed flags.
    Nested(fn() -> Schema),
}

impl Classification {
    /// Element type used for value coercion, where one applies.
    #[must_use]
    pub const fn element_type(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind)
            | Self::Optional(kind)
            | Self::List { element: kind, .. }
            | Self::ListOfList { element: kind, .. } => Some(*kind),
            Self::Bool { .. } => Some(ScalarKind::Bool),
            Self::Dict { .. } | Self::Nested(_) => None,
        }
    }

    /// Whether the declared type was wrapped in `Option`.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        match self {
            Self::Optional(_) => true,
            Self::Bool { optional }
            | Self::List { optional, .. }
            | Self::ListOfList { optional, .. }
            | Self::Dict { optional } => *optional,
            Self::Scalar(_) | Self::Nested(_) => false,
        }
    }

    /// Short label used in diagnostics and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Optional(_) => "optional",
            Self::Bool { .. } => "bool",
            Self::List { .. } => "list",
            Self::ListOfList { .. } => "list_of_list",
            Self::Dict { .. } => "dict",
            Self::Nested(_) => "nested",
        }
    }
}

impl std::fmt::Debug for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nested(schema) => write!(f, "Nested({})", schema().name()),
            Self::Scalar(kind) | Self::Optional(kind) => {
                write!(f, "{}({kind:?})", self.label())
            }
            other => match other.element_type() {
                Some(kind) => write!(f, "{}({kind:?})", other.label()),
                None => f.write_str(other.label()),
            },
        }
    }
}

fn unsupported(field: &str, shape: &TypeShape) -> Arc<ArgsError> {
    Arc::new(ArgsError::UnsupportedType {
        field: field.to_owned(),
        type_name: shape.type_name(),
    })
}

/// Element kind of a list member, if it is a plain scalar.
const fn scalar_element(shape: &TypeShape) -> Option<ScalarKind> {
    match shape {
        TypeShape::Scalar(kind) => Some(*kind),
        TypeShape::Bool => Some(ScalarKind::Bool),
        _ => None,
    }
}

fn classify_list(
    field: &str,
    outer: &TypeShape,
    inner: &TypeShape,
    optional: bool,
) -> ArgsResult<Classification> {
    if let Some(element) = scalar_element(inner) {
        return Ok(Classification::List { element, optional });
    }
    if let TypeShape::List(nested) = inner {
        if let Some(element) = scalar_element(nested) {
            return Ok(Classification::ListOfList { element, optional });
        }
    }
    Err(unsupported(field, outer))
}

/// Classify the declared type of `field`.
///
/// # Errors
///
/// Returns [`ArgsError::UnsupportedType`] naming `field` when the shape has
/// no command-line representation, including doubly wrapped options,
/// optional records and lists of records or maps.
///
/// # Examples
///
/// ```
/// use schema_args::{Classification, TypeShape, classify};
///
/// let class = classify("tags", &TypeShape::list(TypeShape::string()))?;
/// assert_eq!(class.label(), "list");
/// assert!(classify("pair", &TypeShape::Other("(u8, u8)".into())).is_err());
/// # Ok::<_, std::sync::Arc<schema_args::ArgsError>>(())
/// ```
pub fn classify(field: &str, shape: &TypeShape) -> ArgsResult<Classification> {
    match shape {
        TypeShape::Bool => Ok(Classification::Bool { optional: false }),
        TypeShape::Scalar(kind) => Ok(Classification::Scalar(*kind)),
        TypeShape::List(inner) => classify_list(field, shape, inner, false),
        TypeShape::Map { .. } => Ok(Classification::Dict { optional: false }),
        TypeShape::Record(schema) => Ok(Classification::Nested(*schema)),
        TypeShape::Option(inner) => match inner.as_ref() {
            TypeShape::Bool => Ok(Classification::Bool { optional: true }),
            TypeShape::Scalar(kind) => Ok(Classification::Optional(*kind)),
            TypeShape::List(element) => classify_list(field, shape, element, true),
            TypeShape::Map { .. } => Ok(Classification::Dict { optional: true }),
            TypeShape::Option(_) | TypeShape::Record(_) | TypeShape::Other(_) => {
                Err(unsupported(field, shape))
            }
        },
        TypeShape::Other(_) => Err(unsupported(field, shape)),
    }
}
