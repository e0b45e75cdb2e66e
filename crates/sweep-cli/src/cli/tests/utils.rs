//! Tests for validate-duration, json-eq and base64, plus their handlers.

use super::parse;
use crate::cli::commands::{run_json_eq, run_validate_duration};
use crate::cli::CliCommand;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn cli_parse_validate_duration_default_key() {
    match parse(&["sweep", "validate-duration", "10m"]) {
        CliCommand::ValidateDuration { value, key } => {
            assert_eq!(value, "10m");
            assert_eq!(key, "duration");
        }
        _ => panic!("expected ValidateDuration"),
    }
}

#[test]
fn cli_parse_validate_duration_key() {
    match parse(&[
        "sweep",
        "validate-duration",
        "5m",
        "--key",
        "wait_for_capacity_timeout",
    ]) {
        CliCommand::ValidateDuration { key, .. } => assert_eq!(key, "wait_for_capacity_timeout"),
        _ => panic!("expected ValidateDuration with key"),
    }
}

#[test]
fn cli_parse_json_eq() {
    match parse(&["sweep", "json-eq", "a.json", "b.json"]) {
        CliCommand::JsonEq { a, b } => {
            assert_eq!(a.to_str(), Some("a.json"));
            assert_eq!(b.to_str(), Some("b.json"));
        }
        _ => panic!("expected JsonEq"),
    }
}

#[test]
fn cli_parse_base64() {
    match parse(&["sweep", "base64", "hello"]) {
        CliCommand::Base64 { input } => assert_eq!(input, "hello"),
        _ => panic!("expected Base64"),
    }
}

#[test]
fn validate_duration_handler() {
    assert!(run_validate_duration("1h30m", "timeout").is_ok());
    let err = run_validate_duration("-1s", "timeout").unwrap_err();
    assert!(err.to_string().contains("must be greater than zero"));
}

fn json_file(body: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(body.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn json_eq_handler() {
    let a = json_file(r#"{"Version": "2012-10-17", "Statement": []}"#);
    let b = json_file(r#"{"Statement":[],"Version":"2012-10-17"}"#);
    let c = json_file(r#"{"Version": "2008-10-17"}"#);
    assert!(run_json_eq(a.path(), b.path()).is_ok());
    assert!(run_json_eq(a.path(), c.path()).is_err());
}
