//! Token generation for the derived `CliSchema` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use super::crate_path;
use super::parse::{NargsAttr, NestedAttr, ParsedField, ParsedInput, SerdeDefault, option_inner};

mod shape;

use shape::{Shape, shape_of};

fn arity_tokens(arity: NargsAttr, krate: &TokenStream) -> TokenStream {
    match arity {
        NargsAttr::Exactly(n) => quote! { #krate::Arity::Exactly(#n) },
        NargsAttr::ZeroOrOne => quote! { #krate::Arity::ZeroOrOne },
        NargsAttr::ZeroOrMore => quote! { #krate::Arity::ZeroOrMore },
        NargsAttr::OneOrMore => quote! { #krate::Arity::OneOrMore },
    }
}

/// Annotation builder calls for one field, in a fixed order.
fn annotations(field: &ParsedField, krate: &TokenStream) -> Vec<TokenStream> {
    let attrs = &field.attrs;
    let mut out = Vec::new();
    if let Some(short) = attrs.short {
        out.push(quote! { #krate::cli_short(#short) });
    }
    if let Some(help) = attrs.help.as_ref().or(field.doc.as_ref()) {
        out.push(quote! { #krate::cli_help(#help) });
    }
    if let Some(choices) = &attrs.choices {
        out.push(quote! { #krate::cli_choices([#(#choices),*]) });
    }
    match attrs.positional {
        Some(Some(arity)) => {
            let nargs = arity_tokens(arity, krate);
            out.push(quote! { #krate::cli_positional_nargs(#nargs) });
        }
        Some(None) => out.push(quote! { #krate::cli_positional() }),
        None => {}
    }
    match attrs.append {
        Some(Some(arity)) => {
            let nargs = arity_tokens(arity, krate);
            out.push(quote! { #krate::cli_append_nargs(#nargs) });
        }
        Some(None) => out.push(quote! { #krate::cli_append() }),
        None => {}
    }
    match &attrs.nested {
        Some(NestedAttr::FieldName) => out.push(quote! { #krate::cli_nested() }),
        Some(NestedAttr::Prefix(prefix)) => {
            out.push(quote! { #krate::cli_nested_with_prefix(#prefix) });
        }
        None => {}
    }
    if attrs.exclude {
        out.push(quote! { #krate::cli_exclude() });
    }
    if attrs.file_loadable {
        out.push(quote! { #krate::cli_file_loadable() });
    }
    if let Some(name) = &attrs.override_name {
        out.push(quote! { #krate::cli_override_name(#name) });
    }
    out
}

fn explicit_factory(field: &ParsedField, expr: &syn::Expr, krate: &TokenStream) -> TokenStream {
    let ty = &field.field.ty;
    let target = option_inner(ty).unwrap_or(ty);
    quote! {
        || {
            let value: #target = #expr;
            #krate::serde_json::to_value(value)
        }
    }
}

fn serde_factory(field: &ParsedField, krate: &TokenStream) -> Option<TokenStream> {
    let ty = &field.field.ty;
    let factory = match field.serde_default.as_ref()? {
        SerdeDefault::Trait => quote! {
            || #krate::serde_json::to_value(<#ty as ::core::default::Default>::default())
        },
        SerdeDefault::Function(path) => quote! {
            || {
                let value: #ty = #path();
                #krate::serde_json::to_value(value)
            }
        },
    };
    Some(factory)
}

/// `.default_with(...)` call for the field, if it declares a default.
///
/// `#[schema_args(default = ...)]` takes precedence over serde's field
/// default. For `Option<T>` fields the explicit expression has type `T`.
fn default_tokens(field: &ParsedField, krate: &TokenStream) -> Option<TokenStream> {
    let factory = field.attrs.default.as_ref().map_or_else(
        || serde_factory(field, krate),
        |expr| Some(explicit_factory(field, expr, krate)),
    )?;
    Some(quote! { .default_with(#factory) })
}

fn field_def(field: &ParsedField, krate: &TokenStream) -> TokenStream {
    let key = &field.key;
    let ty = &field.field.ty;
    let shape = if field.attrs.nested.is_some() {
        Shape::Record(ty.clone())
    } else {
        shape_of(ty)
    };
    let shape_tokens = shape.tokens(krate);
    let parts = annotations(field, krate);
    let meta = (!parts.is_empty()).then(|| {
        quote! { .meta(#krate::combine_annotations([#(#parts),*])) }
    });
    let default = default_tokens(field, krate);
    quote! {
        #krate::FieldDef::new(#key, #shape_tokens) #meta #default
    }
}

/// Generate `impl CliSchema` for the parsed struct.
pub(crate) fn cli_schema_impl(input: &ParsedInput) -> TokenStream {
    let krate = crate_path::resolve(input.attrs.crate_path.as_ref());
    let ident = &input.ident;
    let name = ident.unraw().to_string();
    let about = input
        .attrs
        .about
        .as_ref()
        .or(input.doc.as_ref())
        .map(|text| quote! { .about(#text) });
    let fields = input.fields.iter().map(|field| field_def(field, &krate));
    let post_build = input.attrs.post_build_hook.then(|| {
        quote! {
            fn post_build(
                &mut self,
                ctx: &#krate::BuildContext,
            ) -> #krate::ArgsResult<()> {
                <Self as #krate::PostBuildHook>::post_build(self, ctx)
            }
        }
    });
    quote! {
        #[automatically_derived]
        impl #krate::CliSchema for #ident {
            fn schema() -> #krate::Schema {
                #krate::Schema::new(#name)
                    .type_key(::core::concat!(::core::module_path!(), "::", #name))
                    #about
                    #( .field(#fields) )*
            }

            #post_build
        }
    }
}
