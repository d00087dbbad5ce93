//! Tests for layer precedence and record construction.

use super::*;
use crate::annotate::{cli_file_loadable, cli_short};
use crate::schema::{FieldDef, TypeShape};
use crate::{ArgsResultExt, Builder, PostBuildHook};
use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;
use test_helpers::with_jail;

#[derive(Debug, Deserialize)]
struct Service {
    port: u16,
    debug: bool,
    #[serde(default)]
    x: Option<i64>,
    #[serde(default)]
    model: Map<String, Value>,
    #[serde(default)]
    prompt: Option<String>,
}

impl CliSchema for Service {
    fn schema() -> Schema {
        Schema::new("Service")
            .field(FieldDef::new("port", TypeShape::uint()).meta(cli_short('p')))
            .field(FieldDef::new("debug", TypeShape::Bool))
            .field(FieldDef::new("x", TypeShape::option(TypeShape::int())))
            .field(
                FieldDef::new(
                    "model",
                    TypeShape::map(TypeShape::string(), TypeShape::Other("Value".into())),
                )
                .default_with(|| Ok(json!({"temperature": 0.5}))),
            )
            .field(
                FieldDef::new("prompt", TypeShape::option(TypeShape::string()))
                    .meta(cli_file_loadable()),
            )
    }
}

#[fixture]
fn builder() -> Builder<Service> {
    Builder::new().expect("schema is valid")
}

fn matches(builder: &Builder<Service>, args: &[&str]) -> ArgMatches {
    builder
        .command()
        .try_get_matches_from(std::iter::once("svc").chain(args.iter().copied()))
        .expect("arguments parse")
}

#[rstest]
fn merge_without_cli_input_is_identity(builder: Builder<Service>) -> Result<()> {
    let merged = builder
        .merge(&matches(&builder, &[]), json!({"x": 1}))
        .map_err(|e| anyhow::anyhow!(e))?;
    ensure!(Value::Object(merged) == json!({"x": 1}));
    Ok(())
}

#[rstest]
#[case::cli_wins(&["--config", "override.json", "--port", "9000"], 9000)]
#[case::file_beats_base(&["--config", "override.json"], 443)]
#[case::base_only(&[], 80)]
fn port_precedence(
    builder: Builder<Service>,
    #[case] args: &[&str],
    #[case] expected: u16,
) -> Result<()> {
    with_jail(|jail| {
        jail.create_file("override.json", r#"{"port": 443}"#)?;
        let service = builder
            .build_config(&matches(&builder, args), json!({"port": 80}))
            .map_err(|e| e.to_string())?;
        assert_eq!(service.port, expected);
        Ok(())
    })
}

#[rstest]
#[case::omitted(&[], true)]
#[case::negated(&["--no-debug"], false)]
fn bool_precedence(builder: Builder<Service>, #[case] args: &[&str], #[case] expected: bool) {
    let service = builder
        .build_config(&matches(&builder, args), json!({"port": 1, "debug": true}))
        .expect("builds");
    assert_eq!(service.debug, expected);
}

#[rstest]
fn bool_defaults_to_false(builder: Builder<Service>) {
    let service = builder
        .build_config(&matches(&builder, &["-p", "1"]), ())
        .expect("builds");
    assert!(!service.debug);
}

#[rstest]
fn base_layers_replace_top_level_keys_wholesale(builder: Builder<Service>) {
    let layers = vec![
        json!({"port": 1, "model": {"temperature": 0.1, "top_k": 5}}),
        json!({"model": {"temperature": 0.9}}),
    ];
    let service = builder
        .build_config(&matches(&builder, &[]), layers)
        .expect("builds");
    assert_eq!(Value::Object(service.model), json!({"temperature": 0.9}));
}

#[rstest]
fn overrides_patch_the_resolved_mapping(builder: Builder<Service>) {
    let base = json!({"port": 1, "model": {"temperature": 0.5, "nested": {"k": "v"}}});
    let service = builder
        .build_config(&matches(&builder, &["--m", "nested.k:v2"]), base)
        .expect("builds");
    assert_eq!(
        Value::Object(service.model),
        json!({"temperature": 0.5, "nested": {"k": "v2"}})
    );
}

#[rstest]
fn overrides_start_from_the_default_mapping(builder: Builder<Service>) {
    let service = builder
        .build_config(&matches(&builder, &["-p", "1", "--m", "top_k:40"]), ())
        .expect("builds");
    assert_eq!(
        Value::Object(service.model),
        json!({"temperature": 0.5, "top_k": 40})
    );
}

#[rstest]
fn override_applies_after_dict_file(builder: Builder<Service>) -> Result<()> {
    with_jail(|jail| {
        jail.create_file("model.json", r#"{"temperature": 0.2, "layers": 4}"#)?;
        let args = ["-p", "1", "--model", "model.json", "--m", "layers:8"];
        let service = builder
            .build_config(&matches(&builder, &args), ())
            .map_err(|e| e.to_string())?;
        assert_eq!(
            Value::Object(service.model),
            json!({"temperature": 0.2, "layers": 8})
        );
        Ok(())
    })
}

#[rstest]
fn malformed_override_echoes_instruction(builder: Builder<Service>) {
    let err = builder
        .build_config(&matches(&builder, &["-p", "1", "--m", "a..b:1"]), ())
        .expect_err("override is malformed");
    assert!(err.to_string().contains("a..b:1"), "{err}");
}

#[rstest]
#[case::scalar(json!(3), "a number")]
#[case::list(json!([1]), "an array")]
fn non_mapping_base_layer_reports_index(
    builder: Builder<Service>,
    #[case] bad: Value,
    #[case] kind: &str,
) {
    let layers = vec![BaseConfig::from(json!({"port": 1})), BaseConfig::from(bad)];
    let err = builder
        .build_config(&matches(&builder, &[]), layers)
        .expect_err("layer is malformed");
    assert!(
        matches!(&*err, ArgsError::MalformedBaseConfig { index: 1, found } if *found == kind),
        "{err}"
    );
}

#[rstest]
fn missing_base_file_reports_index(builder: Builder<Service>) -> Result<()> {
    with_jail(|jail| {
        jail.create_file("company.json", r#"{"port": 1}"#)?;
        let layers = BaseConfigs::from(vec!["company.json", "missing.json"]);
        let err = builder
            .build_config(&matches(&builder, &[]), layers)
            .expect_err("second layer is missing");
        assert!(
            matches!(&*err, ArgsError::BaseConfigFile { index: 1, .. }),
            "{err}"
        );
        Ok(())
    })
}

#[rstest]
fn missing_config_file_is_a_file_error(builder: Builder<Service>) {
    let err = builder
        .build_config(&matches(&builder, &["--config", "/no/such/file.json"]), ())
        .expect_err("config file is missing");
    assert!(matches!(&*err, ArgsError::File { .. }), "{err}");
}

#[rstest]
fn file_loadable_values_are_resolved(builder: Builder<Service>) -> Result<()> {
    with_jail(|jail| {
        jail.create_file("prompt.txt", "You are helpful.")?;
        let service = builder
            .build_config(&matches(&builder, &["-p", "1", "--prompt", "@prompt.txt"]), ())
            .map_err(|e| e.to_string())?;
        assert_eq!(service.prompt.as_deref(), Some("You are helpful."));
        Ok(())
    })
}

#[rstest]
fn missing_required_value_is_a_merge_error(builder: Builder<Service>) {
    let err = builder
        .build_config(&matches(&builder, &[]), ())
        .expect_err("port is required");
    assert!(matches!(&*err, ArgsError::Merge { .. }), "{err}");
}

#[derive(Debug, Deserialize)]
struct Window {
    low: i64,
    high: i64,
    #[serde(skip)]
    sources: usize,
}

impl CliSchema for Window {
    fn schema() -> Schema {
        Schema::new("Window")
            .field(FieldDef::new("low", TypeShape::int()))
            .field(FieldDef::new("high", TypeShape::int()))
    }

    fn post_build(&mut self, ctx: &BuildContext) -> ArgsResult<()> {
        PostBuildHook::post_build(self, ctx)
    }
}

impl PostBuildHook for Window {
    fn post_build(&mut self, ctx: &BuildContext) -> ArgsResult<()> {
        if self.low > self.high {
            return Err(ArgsError::validation("low", "must not exceed high"));
        }
        self.sources = ctx.base_layers() + usize::from(ctx.has_cli_input());
        Ok(())
    }
}

#[test]
fn post_build_hook_sees_the_context() -> Result<()> {
    let builder = Builder::<Window>::new().map_err(|e| anyhow::anyhow!(e))?;
    let window = builder
        .build_config_from(["w", "--high", "9"], json!({"low": 1}))
        .map_err(|e| anyhow::anyhow!(e))?;
    ensure!(window.sources == 2);
    let err = builder
        .build_config_from(["w", "--low", "10"], json!({"high": 1}))
        .expect_err("hook rejects inverted window");
    ensure!(matches!(&*err, ArgsError::Validation { .. }));
    Ok(())
}

#[test]
fn deserialization_errors_map_to_merge() {
    let result: ArgsResult<u8> = serde_json::from_value::<u8>(json!("x")).into_args();
    let err = result.expect_err("a string is not a u8");
    assert!(matches!(&*err, ArgsError::Merge { .. }));
}
