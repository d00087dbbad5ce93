//! Help text rendering.

use crate::analyze::FieldDescriptor;
use crate::annotate::Arity;
use crate::inspect::Classification;

fn base(descriptor: &FieldDescriptor) -> String {
    descriptor
        .help()
        .map(ToOwned::to_owned)
        .or_else(|| descriptor.path().last().cloned())
        .unwrap_or_default()
}

/// Custom help (or the field name) followed by an arity hint for lists.
pub(super) fn text(descriptor: &FieldDescriptor) -> String {
    let base = base(descriptor);
    let hint = match (descriptor.classification(), descriptor.append()) {
        (Classification::ListOfList { .. }, Some(arity)) => {
            Some(format!("repeatable; each use takes {arity}"))
        }
        (Classification::List { .. }, Some(_)) => Some("repeatable".to_owned()),
        (Classification::List { .. }, None) => {
            let arity = descriptor.positional().unwrap_or_else(|| {
                if descriptor.has_default() || descriptor.classification().is_optional() {
                    Arity::ZeroOrMore
                } else {
                    Arity::OneOrMore
                }
            });
            Some(arity.to_string())
        }
        (Classification::Dict { .. }, _) => Some("path to a structured file".to_owned()),
        _ => None,
    };
    match hint {
        Some(hint) => format!("{base} ({hint})"),
        None => base,
    }
}

/// Help for a dictionary's override flag.
pub(super) fn override_text(descriptor: &FieldDescriptor) -> String {
    format!(
        "Override one key of {} as KEY.PATH:VALUE (repeatable)",
        descriptor.long_flag()
    )
}
