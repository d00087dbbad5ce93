//! Annotation compatibility and positional ordering rules.

use std::sync::Arc;

use serde_json::Value;

use crate::annotate::{Arity, FieldMeta};
use crate::coerce::parse_scalar;
use crate::inspect::Classification;
use crate::schema::{FieldDef, ScalarKind};
use crate::{ArgsError, ArgsResult};

use super::FieldDescriptor;

/// Annotation values that passed validation for one leaf.
#[derive(Debug, Default)]
pub(super) struct Checked {
    pub(super) choices: Option<Vec<Value>>,
    pub(super) positional: Option<Arity>,
    pub(super) append: Option<Arity>,
}

fn reject(field: &str, message: impl Into<String>) -> ArgsResult<()> {
    Err(ArgsError::invalid_annotation(field, message))
}

/// Record fields only accept a prefix, help text and exclusion.
pub(super) fn nested_annotations(field: &str, meta: &FieldMeta) -> ArgsResult<()> {
    let invalid = [
        (meta.short().is_some(), "short options"),
        (meta.choices().is_some(), "choices"),
        (meta.positional().is_some(), "positional consumption"),
        (meta.append().is_some(), "repeated occurrences"),
        (meta.is_file_loadable(), "file loading"),
        (meta.override_name().is_some(), "override names"),
    ];
    match invalid.iter().find(|(present, _)| *present) {
        Some((_, what)) => reject(field, format!("{what} cannot be applied to a nested record")),
        None => Ok(()),
    }
}

/// Check annotations on a leaf field against its classification.
pub(super) fn leaf_annotations(
    field: &str,
    def: &FieldDef,
    class: Classification,
) -> ArgsResult<Checked> {
    let meta = def.annotations();
    if meta.nested().is_some() {
        reject(field, "only record fields can be nested")?;
    }
    if let Some(short) = meta.short() {
        if !short.is_ascii_alphanumeric() {
            reject(field, format!("short option '{short}' must be an ASCII letter or digit"))?;
        }
    }
    if meta.override_name().is_some() && !matches!(class, Classification::Dict { .. }) {
        reject(field, "override names only apply to dictionary fields")?;
    }
    if meta.is_file_loadable() && !is_text(class) {
        reject(field, "only text fields can be loaded from files")?;
    }
    let positional = match meta.positional() {
        Some(arity) => Some(positional_arity(field, def, meta, class, arity)?),
        None => None,
    };
    let append = append_arity(field, meta, class)?;
    let choices = match meta.choices() {
        Some(choices) => Some(coerce_choices(field, class, choices)?),
        None => None,
    };
    Ok(Checked {
        choices,
        positional,
        append,
    })
}

const fn is_text(class: Classification) -> bool {
    matches!(
        class,
        Classification::Scalar(ScalarKind::Str | ScalarKind::Path)
            | Classification::Optional(ScalarKind::Str | ScalarKind::Path)
    )
}

fn positional_arity(
    field: &str,
    def: &FieldDef,
    meta: &FieldMeta,
    class: Classification,
    explicit: Option<Arity>,
) -> ArgsResult<Arity> {
    if meta.append().is_some() {
        reject(field, "a positional field cannot also use repeated occurrences")?;
    }
    if meta.short().is_some() {
        reject(field, "a positional field cannot have a short option")?;
    }
    if meta.is_excluded() {
        reject(field, "an excluded field cannot be positional")?;
    }
    let has_default = def.default_factory().is_some();
    let arity = match (class, explicit) {
        (Classification::Scalar(_) | Classification::Optional(_), Some(arity)) => {
            if arity.is_multiple() || arity == Arity::Exactly(0) {
                reject(field, format!("a single-valued field cannot take {arity}"))?;
            }
            arity
        }
        (Classification::Scalar(_), None) if has_default => Arity::ZeroOrOne,
        (Classification::Scalar(_), None) => Arity::Exactly(1),
        (Classification::Optional(_), None) => Arity::ZeroOrOne,
        (Classification::List { .. }, Some(arity)) => {
            if arity == Arity::Exactly(0) {
                reject(field, "a positional list must take at least one value")?;
            }
            arity
        }
        (Classification::List { optional, .. }, None) if has_default || optional => {
            Arity::ZeroOrMore
        }
        (Classification::List { .. }, None) => Arity::OneOrMore,
        (other, _) => {
            return Err(ArgsError::invalid_annotation(
                field,
                format!("{} fields cannot be positional", other.label()),
            ));
        }
    };
    Ok(arity)
}

fn append_arity(
    field: &str,
    meta: &FieldMeta,
    class: Classification,
) -> ArgsResult<Option<Arity>> {
    match (class, meta.append()) {
        (Classification::ListOfList { .. }, None) => Err(ArgsError::invalid_annotation(
            field,
            "a list of lists is only filled by repeated occurrences; mark it with append",
        )),
        (_, None) => Ok(None),
        (Classification::List { .. }, Some(None | Some(Arity::Exactly(1)))) => {
            Ok(Some(Arity::Exactly(1)))
        }
        (Classification::List { .. }, Some(Some(arity))) => Err(ArgsError::invalid_annotation(
            field,
            format!("a flat list collects one value per occurrence, not {arity}; use a list of lists"),
        )),
        (Classification::ListOfList { .. }, Some(Some(Arity::Exactly(0)))) => Err(
            ArgsError::invalid_annotation(field, "each occurrence must take at least one value"),
        ),
        (Classification::ListOfList { .. }, Some(arity)) => {
            Ok(Some(arity.unwrap_or(Arity::Exactly(1))))
        }
        (other, Some(_)) => Err(ArgsError::invalid_annotation(
            field,
            format!("repeated occurrences need a list field, found {}", other.label()),
        )),
    }
}

fn coerce_choices(
    field: &str,
    class: Classification,
    choices: &[String],
) -> ArgsResult<Vec<Value>> {
    let kind = match class {
        Classification::Scalar(kind)
        | Classification::Optional(kind)
        | Classification::List { element: kind, .. }
        | Classification::ListOfList { element: kind, .. } => kind,
        other => {
            return Err(ArgsError::invalid_annotation(
                field,
                format!("choices cannot restrict {} fields", other.label()),
            ));
        }
    };
    if choices.is_empty() {
        return Err(ArgsError::invalid_annotation(field, "choices must not be empty"));
    }
    choices
        .iter()
        .map(|choice| {
            parse_scalar(kind, choice).map_err(|reason| {
                ArgsError::invalid_annotation(field, format!("choice '{choice}' is invalid: {reason}"))
            })
        })
        .collect()
}

/// Positionals must not follow a variadic positional, and a required
/// positional must not follow an optional one.
pub(super) fn positional_order(descriptors: &[FieldDescriptor]) -> ArgsResult<()> {
    let mut variadic: Option<&FieldDescriptor> = None;
    let mut optional: Option<&FieldDescriptor> = None;
    for descriptor in descriptors.iter().filter(|d| d.positional().is_some()) {
        if let Some(earlier) = variadic {
            return Err(Arc::new(ArgsError::PositionalOrder {
                variadic: earlier.dest(),
                following: descriptor.dest(),
            }));
        }
        if let Some(earlier) = optional.filter(|_| descriptor.is_required_positional()) {
            return Err(ArgsError::invalid_annotation(
                &descriptor.dest(),
                format!("required positional follows optional positional '{}'", earlier.dest()),
            ));
        }
        if descriptor.positional().is_some_and(Arity::is_variable) {
            variadic = Some(descriptor);
        }
        if !descriptor.is_required_positional() {
            optional = Some(descriptor);
        }
    }
    Ok(())
}
