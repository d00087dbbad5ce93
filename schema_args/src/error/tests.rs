//! Unit tests for error classification and constructors.

use std::path::Path;
use std::sync::Arc;

use clap::{Command, error::ErrorKind};
use rstest::rstest;

use super::{ArgsError, is_display_request};

fn build_error(kind: ErrorKind) -> clap::Error {
    Command::new("demo").error(kind, "demo output")
}

#[rstest]
#[case(ErrorKind::DisplayHelp)]
#[case(ErrorKind::DisplayVersion)]
fn recognises_display_requests(#[case] kind: ErrorKind) {
    assert!(is_display_request(&build_error(kind)));
}

#[rstest]
#[case(ErrorKind::UnknownArgument)]
#[case(ErrorKind::InvalidValue)]
fn rejects_regular_errors(#[case] kind: ErrorKind) {
    assert!(!is_display_request(&build_error(kind)));
}

#[test]
fn base_config_file_keeps_index_and_source() {
    let inner = ArgsError::file(Path::new("missing.json"), std::io::Error::other("gone"));
    let err = ArgsError::base_config_file(2, inner);
    let rendered = err.to_string();
    assert!(rendered.contains("#2"), "unexpected message: {rendered}");
    assert!(matches!(
        &*err,
        ArgsError::BaseConfigFile { index: 2, source } if matches!(**source, ArgsError::File { .. })
    ));
}

#[test]
fn base_config_file_handles_shared_source() {
    let inner = ArgsError::file(Path::new("shared.json"), std::io::Error::other("gone"));
    let keep = Arc::clone(&inner);
    let err = ArgsError::base_config_file(0, inner);
    assert!(err.to_string().contains("shared.json"));
    drop(keep);
}

#[test]
fn collision_messages_name_both_fields() {
    let err = ArgsError::NameCollision {
        flag: "db-host".into(),
        first: "db_host".into(),
        second: "database.host".into(),
    };
    let text = err.to_string();
    assert!(text.contains("--db-host"));
    assert!(text.contains("db_host"));
    assert!(text.contains("database.host"));
}
