//! Mapping from Rust field types to `TypeShape` constructors.

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::Type;

use crate::derive::parse::{last_ident, list_inner, map_inner, option_inner};

const SIGNED: [&str; 6] = ["i8", "i16", "i32", "i64", "i128", "isize"];
const UNSIGNED: [&str; 6] = ["u8", "u16", "u32", "u64", "u128", "usize"];

/// Scalar field kinds. Integers keep their primitive name so the generated
/// code can read its width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scalar {
    Str,
    Int(&'static str),
    UInt(&'static str),
    Float,
    Char,
    Path,
}

impl Scalar {
    fn from_ident(ident: &str) -> Option<Self> {
        if let Some(prim) = SIGNED.iter().find(|p| **p == ident) {
            return Some(Self::Int(*prim));
        }
        if let Some(prim) = UNSIGNED.iter().find(|p| **p == ident) {
            return Some(Self::UInt(*prim));
        }
        match ident {
            "String" | "str" => Some(Self::Str),
            "f32" | "f64" => Some(Self::Float),
            "char" => Some(Self::Char),
            "PathBuf" | "Utf8PathBuf" => Some(Self::Path),
            _ => None,
        }
    }

    fn tokens(self, krate: &TokenStream) -> TokenStream {
        let unit = |variant: &str| {
            let variant = format_ident!("{}", variant);
            quote! { #krate::ScalarKind::#variant }
        };
        match self {
            Self::Str => unit("Str"),
            Self::Float => unit("Float"),
            Self::Char => unit("Char"),
            Self::Path => unit("Path"),
            Self::Int(prim) => {
                let prim = format_ident!("{}", prim);
                quote! { #krate::ScalarKind::signed(#prim::BITS) }
            }
            Self::UInt(prim) => {
                let prim = format_ident!("{}", prim);
                quote! { #krate::ScalarKind::unsigned(#prim::BITS) }
            }
        }
    }
}

/// Compile-time mirror of the runtime `TypeShape`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Shape {
    Bool,
    Scalar(Scalar),
    Option(Box<Self>),
    List(Box<Self>),
    Map(Box<Self>, Box<Self>),
    Record(Type),
    Other(String),
}

fn type_text(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Shape of a field type that is not marked nested.
///
/// Unrecognised types become `Other` and are reported by the analyzer when
/// the schema is used.
pub(crate) fn shape_of(ty: &Type) -> Shape {
    if let Some(inner) = option_inner(ty) {
        return Shape::Option(Box::new(shape_of(inner)));
    }
    if let Some(element) = list_inner(ty) {
        return Shape::List(Box::new(shape_of(element)));
    }
    if let Some((key, value)) = map_inner(ty) {
        return Shape::Map(Box::new(shape_of(key)), Box::new(shape_of(value)));
    }
    match last_ident(ty).as_deref() {
        Some("bool") => Shape::Bool,
        Some(ident) => {
            Scalar::from_ident(ident).map_or_else(|| Shape::Other(type_text(ty)), Shape::Scalar)
        }
        None => Shape::Other(type_text(ty)),
    }
}

impl Shape {
    pub(crate) fn tokens(&self, krate: &TokenStream) -> TokenStream {
        match self {
            Self::Bool => quote! { #krate::TypeShape::Bool },
            Self::Scalar(kind) => {
                let kind = kind.tokens(krate);
                quote! { #krate::TypeShape::Scalar(#kind) }
            }
            Self::Option(inner) => {
                let wrapped = inner.tokens(krate);
                quote! { #krate::TypeShape::option(#wrapped) }
            }
            Self::List(element) => {
                let items = element.tokens(krate);
                quote! { #krate::TypeShape::list(#items) }
            }
            Self::Map(key, value) => {
                let keys = key.tokens(krate);
                let values = value.tokens(krate);
                quote! { #krate::TypeShape::map(#keys, #values) }
            }
            Self::Record(ty) => {
                quote! { #krate::TypeShape::Record(<#ty as #krate::CliSchema>::schema) }
            }
            Self::Other(name) => {
                quote! { #krate::TypeShape::Other(::std::string::String::from(#name)) }
            }
        }
    }
}
