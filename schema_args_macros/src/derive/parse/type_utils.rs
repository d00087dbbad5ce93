//! Type introspection helpers.
//!
//! These utilities perform shallow inspection of `syn::Type` values to
//! recognise wrapper types such as `Option<T>`, sequence containers such as
//! `Vec<T>` and mappings such as `BTreeMap<K, V>`.

use syn::{GenericArgument, PathArguments, Type};

const LIST_WRAPPERS: &[&str] = &["Vec", "VecDeque", "HashSet", "BTreeSet"];
const MAP_WRAPPERS: &[&str] = &["HashMap", "BTreeMap", "Map"];

/// Final path segment of `ty`, ignoring any module prefix.
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(p) = ty else {
        return None;
    };
    if p.qself.is_some() {
        return None;
    }
    p.path.segments.last()
}

/// Type arguments of the final path segment, in order.
fn type_arguments(segment: &syn::PathSegment) -> Vec<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Vec::new();
    };
    args.args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        })
        .collect()
}

/// Identifier of the final path segment, e.g. `PathBuf` for
/// `std::path::PathBuf`.
pub(crate) fn last_ident(ty: &Type) -> Option<String> {
    last_segment(ty).map(|segment| segment.ident.to_string())
}

/// Returns the generic parameter if `ty` is one of `wrappers` with a single
/// type argument.
///
/// The check is shallow: it inspects only the outermost path and matches
/// fully-qualified forms like `std::option::Option<T>`.
fn single_inner<'a>(ty: &'a Type, wrappers: &[&str]) -> Option<&'a Type> {
    let segment = last_segment(ty)?;
    if !wrappers.iter().any(|w| segment.ident == w) {
        return None;
    }
    match type_arguments(segment).as_slice() {
        [inner] => Some(*inner),
        _ => None,
    }
}

/// Returns the inner type if `ty` is `Option<T>`.
///
/// Not recursive: `Option<Vec<T>>` yields `Vec<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    single_inner(ty, &["Option"])
}

/// Returns the element type if `ty` is a sequence or set container.
pub(crate) fn list_inner(ty: &Type) -> Option<&Type> {
    single_inner(ty, LIST_WRAPPERS)
}

/// Returns the key and value types if `ty` is a `HashMap`, `BTreeMap` or
/// `serde_json::Map`.
pub(crate) fn map_inner(ty: &Type) -> Option<(&Type, &Type)> {
    let segment = last_segment(ty)?;
    if !MAP_WRAPPERS.iter().any(|w| segment.ident == w) {
        return None;
    }
    match type_arguments(segment).as_slice() {
        [key, value, ..] => Some((*key, *value)),
        _ => None,
    }
}
