//! Procedural macros for `schema_args`.
//!
//! `#[derive(CliSchema)]` implements `schema_args::CliSchema` for a struct
//! with named fields. The generated `schema()` lists the fields in
//! declaration order, maps each Rust type onto a `schema_args::TypeShape`,
//! and records the `#[schema_args(...)]` annotations and defaults. Field keys
//! follow serde's `rename` and `rename_all` rules so the schema agrees with
//! the struct's `Deserialize` implementation.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `schema_args::CliSchema` for a struct with named fields.
///
/// Struct attributes:
///
/// - `about = "..."` sets the command description; the struct's doc comment
///   is used otherwise.
/// - `post_build_hook` delegates `CliSchema::post_build` to the struct's
///   `schema_args::PostBuildHook` implementation.
/// - `crate = "path"` names the `schema_args` dependency when it is renamed.
///
/// Field attributes:
///
/// - `short = 'x'`, `help = "..."` (the doc comment is the fallback) and
///   `choices(...)`.
/// - `positional` or `positional(nargs = N | "?" | "*" | "+")`.
/// - `append` or `append(nargs = ...)`.
/// - `nested` or `nested(prefix = "...")` for fields holding another
///   `CliSchema` record.
/// - `exclude`, `file_loadable` and `override_name = "..."`.
/// - `default = expr`; for `Option<T>` fields the expression has type `T`.
///
/// Fields skipped by serde are left out of the schema, and a field-level
/// `#[serde(default)]` doubles as the schema default.
#[proc_macro_derive(CliSchema, attributes(schema_args))]
pub fn derive_cli_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
