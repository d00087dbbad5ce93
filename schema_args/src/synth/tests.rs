//! Tests for clap argument registration.

use super::*;
use crate::analyze::analyze;
use crate::annotate::{
    cli_append, cli_append_nargs, cli_choices, cli_exclude, cli_nested, cli_positional, cli_short,
};
use crate::schema::{FieldDef, Schema, TypeShape};
use clap::parser::ValueSource;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn database() -> Schema {
    Schema::new("Database")
        .about("Database")
        .field(FieldDef::new("port", TypeShape::uint()))
}

fn schema() -> Schema {
    Schema::new("App")
        .field(FieldDef::new("name", TypeShape::string()).meta(cli_short('n')))
        .field(FieldDef::new("count", TypeShape::int()).meta(cli_choices(["1", "2", "3"])))
        .field(FieldDef::new("debug", TypeShape::Bool))
        .field(FieldDef::new("tags", TypeShape::list(TypeShape::string())))
        .field(FieldDef::new("include", TypeShape::list(TypeShape::string())).meta(cli_append()))
        .field(
            FieldDef::new("env", TypeShape::list(TypeShape::list(TypeShape::string())))
                .meta(cli_append_nargs(Arity::Exactly(2))),
        )
        .field(FieldDef::new(
            "model_config",
            TypeShape::map(TypeShape::string(), TypeShape::Other("Value".into())),
        ))
        .field(FieldDef::new("secret", TypeShape::string()).meta(cli_exclude()))
        .field(FieldDef::new("database", TypeShape::Record(database)).meta(cli_nested()))
        .field(FieldDef::new("input", TypeShape::path()).meta(cli_positional()))
}

#[fixture]
fn command() -> Command {
    let descriptors = analyze(&schema()).expect("schema is valid");
    register_arguments(Command::new("app"), &descriptors, &ConfigFlag::default())
}

fn parse(cmd: Command, args: &[&str]) -> clap::ArgMatches {
    cmd.try_get_matches_from(std::iter::once("app").chain(args.iter().copied()))
        .expect("arguments parse")
}

#[rstest]
fn registers_expected_flags(command: Command) {
    let longs: Vec<_> = command.get_arguments().filter_map(Arg::get_long).collect();
    for expected in [
        "name", "count", "debug", "no-debug", "tags", "include", "env", "model-config", "mc",
        "database-port", "config",
    ] {
        assert!(longs.contains(&expected), "missing --{expected} in {longs:?}");
    }
    assert!(!longs.contains(&"secret"));
}

#[rstest]
fn omitted_flags_are_not_supplied(command: Command) {
    let matches = parse(command, &["in.txt"]);
    assert_ne!(matches.value_source("debug"), Some(ValueSource::CommandLine));
    assert_ne!(matches.value_source("name"), Some(ValueSource::CommandLine));
    assert_eq!(matches.get_one::<Value>("input"), Some(&json!("in.txt")));
}

#[rstest]
#[case::positive(&["--debug"], "debug")]
#[case::negative(&["--no-debug"], "debug/no")]
#[case::last_wins(&["--no-debug", "--debug"], "debug")]
fn bool_pair_records_last_occurrence(
    command: Command,
    #[case] args: &[&str],
    #[case] supplied: &str,
) {
    let mut argv = vec!["in.txt"];
    argv.extend_from_slice(args);
    let matches = parse(command, &argv);
    assert_eq!(matches.value_source(supplied), Some(ValueSource::CommandLine));
}

#[rstest]
fn list_takes_all_values_after_one_flag(command: Command) {
    let matches = parse(command, &["--tags", "a", "b", "--name", "x", "in.txt"]);
    let tags: Vec<_> = matches.get_many::<Value>("tags").expect("tags").collect();
    assert_eq!(tags, [&json!("a"), &json!("b")]);
}

#[rstest]
fn append_groups_by_occurrence(command: Command) {
    let matches = parse(
        command,
        &["--env", "A", "1", "--env", "B", "2", "--include", "x", "--include", "y", "in.txt"],
    );
    let env: Vec<Vec<&Value>> = matches
        .get_occurrences::<Value>("env")
        .expect("env occurrences")
        .map(Iterator::collect)
        .collect();
    assert_eq!(env, [vec![&json!("A"), &json!("1")], vec![&json!("B"), &json!("2")]]);
    let include: Vec<_> = matches.get_many::<Value>("include").expect("include").collect();
    assert_eq!(include, [&json!("x"), &json!("y")]);
}

#[rstest]
fn choices_are_enforced(command: Command) {
    let err = command
        .try_get_matches_from(["app", "--count", "9", "in.txt"])
        .expect_err("9 is not a choice");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[rstest]
fn dict_override_is_repeatable(command: Command) {
    let matches = parse(command, &["--mc", "a.b:1", "--mc", "c:2", "in.txt"]);
    let overrides: Vec<_> = matches
        .get_many::<String>("model_config/override")
        .expect("overrides")
        .collect();
    assert_eq!(overrides, ["a.b:1", "c:2"]);
}

#[rstest]
fn missing_required_positional_is_a_usage_error(command: Command) {
    let err = command
        .try_get_matches_from(["app"])
        .expect_err("input is required");
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn custom_config_flag_is_registered() {
    let descriptors = analyze(&Schema::new("Empty")).expect("empty schema is valid");
    let cmd = register_arguments(
        Command::new("app"),
        &descriptors,
        &ConfigFlag::new("settings").help("Settings file"),
    );
    let matches = cmd
        .try_get_matches_from(["app", "--settings", "s.json"])
        .expect("parses");
    assert_eq!(
        matches.get_one::<PathBuf>(CONFIG_ID),
        Some(&PathBuf::from("s.json"))
    );
}
