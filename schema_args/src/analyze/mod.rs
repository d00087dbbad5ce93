//! Field analysis.
//!
//! Walks a [`Schema`] in declaration order and produces one
//! [`FieldDescriptor`] per leaf field. Nested records are expanded in place:
//! their fields inherit a composed flag prefix, lose short options once a
//! prefix applies, and are grouped under a help heading. Flag claims are
//! recorded in a shared [`FlagRegistry`] while walking so collisions surface
//! with both field paths named. Positional ordering is checked once the walk
//! completes.

mod descriptor;
mod naming;
mod registry;
mod validate;

use heck::ToKebabCase;
use tracing::debug;

pub use descriptor::FieldDescriptor;
pub use registry::FlagRegistry;

use crate::annotate::NestedPrefix;
use crate::inspect::{Classification, classify};
use crate::schema::{FieldDef, Schema};
use crate::{ArgsError, ArgsResult};

/// Walk state inherited by the fields of one record.
#[derive(Clone, Debug, Default)]
struct Scope {
    path: Vec<String>,
    prefix: String,
    heading: Option<String>,
    records: Vec<String>,
}

impl Scope {
    fn child_path(&self, name: &str) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(name.to_owned());
        path
    }

    fn shorts_allowed(&self) -> bool {
        self.prefix.is_empty()
    }
}

/// Flatten `schema` into leaf descriptors using the built-in reserved flags.
///
/// # Errors
///
/// Returns an error when a field has an unsupported type, carries
/// incompatible annotations, collides with another flag or breaks positional
/// ordering.
///
/// # Examples
///
/// ```
/// use schema_args::{FieldDef, Schema, TypeShape, analyze, cli_nested_with_prefix};
///
/// fn database() -> Schema {
///     Schema::new("Database").field(FieldDef::new("host", TypeShape::string()))
/// }
///
/// let schema = Schema::new("App")
///     .field(FieldDef::new("database", TypeShape::Record(database)).meta(cli_nested_with_prefix("db")));
/// let fields = analyze(&schema)?;
/// assert_eq!(fields[0].cli_name(), "db-host");
/// assert_eq!(fields[0].dest(), "database.host");
/// # Ok::<_, std::sync::Arc<schema_args::ArgsError>>(())
/// ```
pub fn analyze(schema: &Schema) -> ArgsResult<Vec<FieldDescriptor>> {
    analyze_with(schema, &mut FlagRegistry::with_builtins())
}

/// Flatten `schema`, claiming flags in a caller-supplied registry.
///
/// # Errors
///
/// See [`analyze`].
pub fn analyze_with(
    schema: &Schema,
    registry: &mut FlagRegistry,
) -> ArgsResult<Vec<FieldDescriptor>> {
    let mut descriptors = Vec::new();
    let root = Scope {
        records: vec![schema.identity().to_owned()],
        ..Scope::default()
    };
    walk(schema, &root, registry, &mut descriptors)?;
    validate::positional_order(&descriptors)?;
    debug!(
        schema = schema.name(),
        fields = descriptors.len(),
        "analyzed schema"
    );
    Ok(descriptors)
}

fn walk(
    schema: &Schema,
    scope: &Scope,
    registry: &mut FlagRegistry,
    out: &mut Vec<FieldDescriptor>,
) -> ArgsResult<()> {
    for field in schema.fields() {
        let path = scope.child_path(field.name());
        let dest = path.join(".");
        let classification = classify(&dest, field.shape())?;
        if let Classification::Nested(nested) = classification {
            if field.annotations().is_excluded() {
                debug!(field = %dest, "skipping excluded nested record");
                continue;
            }
            let (child, schema) = nested_scope(field, scope, path, nested)?;
            walk(&schema, &child, registry, out)?;
            continue;
        }
        let descriptor = leaf(field, scope, path, classification)?;
        registry.claim_descriptor(&descriptor)?;
        out.push(descriptor);
    }
    Ok(())
}

fn nested_scope(
    field: &FieldDef,
    scope: &Scope,
    path: Vec<String>,
    nested: fn() -> Schema,
) -> ArgsResult<(Scope, Schema)> {
    let dest = path.join(".");
    validate::nested_annotations(&dest, field.annotations())?;
    let schema = nested();
    if scope.records.iter().any(|r| r == schema.identity()) {
        return Err(ArgsError::invalid_annotation(
            &dest,
            format!("record '{}' nests itself", schema.name()),
        ));
    }
    let own = match field.annotations().nested() {
        Some(NestedPrefix::Explicit(prefix)) => {
            naming::validate_prefix(&dest, prefix)?;
            prefix.clone()
        }
        Some(NestedPrefix::FieldName) => field.name().to_kebab_case(),
        None => {
            return Err(ArgsError::invalid_annotation(
                &dest,
                "record fields must be marked nested",
            ));
        }
    };
    let mut records = scope.records.clone();
    records.push(schema.identity().to_owned());
    let child = Scope {
        path,
        prefix: naming::join(&scope.prefix, &own),
        heading: Some(
            schema
                .description()
                .map_or_else(|| schema.name().to_owned(), ToOwned::to_owned),
        ),
        records,
    };
    Ok((child, schema))
}

fn leaf(
    field: &FieldDef,
    scope: &Scope,
    path: Vec<String>,
    classification: Classification,
) -> ArgsResult<FieldDescriptor> {
    let dest = path.join(".");
    let meta = field.annotations();
    let cli_name = naming::join(&scope.prefix, &field.name().to_kebab_case());
    naming::validate_long(&dest, &cli_name)?;
    let checked = validate::leaf_annotations(&dest, field, classification)?;
    let override_name = match classification {
        Classification::Dict { .. } => {
            let own = meta
                .override_name()
                .map_or_else(|| naming::initials(field.name()), ToOwned::to_owned);
            let name = naming::join(&scope.prefix, &own);
            naming::validate_long(&dest, &name)?;
            Some(name)
        }
        _ => None,
    };
    let short = meta.short().filter(|_| scope.shorts_allowed());
    if short.is_none() && meta.short().is_some() {
        debug!(field = %dest, "short option suppressed under nested prefix");
    }
    Ok(FieldDescriptor {
        path,
        classification,
        cli_name,
        short,
        help: meta.help().map(ToOwned::to_owned),
        choices: checked.choices,
        positional: checked.positional,
        append: checked.append,
        excluded: meta.is_excluded(),
        file_loadable: meta.is_file_loadable(),
        nested_prefix: (!scope.prefix.is_empty()).then(|| scope.prefix.clone()),
        override_name,
        heading: scope.heading.clone(),
        has_default: field.default_factory().is_some()
            || matches!(classification, Classification::Bool { optional: false }),
        default: field.default_factory(),
    })
}
