//! Integration tests for the cmp matcher and check suites
//!
//! These tests replay the compare-matcher scenarios end to end: through the
//! public `compare` API, through the matcher language, and through a suite
//! file loaded from disk.

use cmp_check::cmp::{self, parse_literal, Pattern};
use cmp_check::suite::{run_suite, SuiteLoader, Status};
use cmp_check::{compare, CmpError, CompareOp, Value};
use once_cell::sync::Lazy;
use serde_json::json;
use std::path::PathBuf;

static SUITE_PATH: Lazy<PathBuf> = Lazy::new(|| {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("suites/compare_matcher.yaml")
});

// ============================================================================
// Helpers
// ============================================================================

fn lit(input: &str) -> Value {
    parse_literal(input).expect("valid literal")
}

fn holds(actual: &str, expression: &str) -> bool {
    cmp::parse(expression)
        .expect("valid expression")
        .evaluate(&lit(actual))
        .passed
}

// ============================================================================
// Comparator properties
// ============================================================================

#[test]
fn test_numbers_equal_themselves_and_their_float() {
    for n in [-666i64, -1, 0, 1, 22, 122, 416, i64::from(i32::MAX)] {
        let int = Value::Integer(n);
        assert!(compare(&int, CompareOp::Eq, &int), "{} == {}", n, n);
        assert!(
            compare(&int, CompareOp::Eq, &Value::Float(n as f64)),
            "{} == {}.0",
            n,
            n
        );
    }
}

#[test]
fn test_case_insensitive_diverges_from_strict_equality() {
    let actual = Value::from("VERBOSE");
    let expected = Value::from("verbose");
    assert!(compare(&actual, CompareOp::Eq, &expected));
    assert_ne!(actual, expected);
}

#[test]
fn test_octal_literal_against_decimal_string() {
    assert!(compare(&lit("0o640"), CompareOp::Eq, &Value::from("416")));
    assert!(compare(&lit("0o640"), CompareOp::Eq, &lit("0o640")));
}

#[test]
fn test_regex_containment_respects_flags() {
    let actual = Value::from("some 123");
    let insensitive = Pattern::new(r"^SOME\s\d+(1|2|3)3", "i").unwrap();
    let sensitive = Pattern::new("^SOME", "").unwrap();

    assert!(compare(&actual, CompareOp::Matches, &insensitive.into()));
    assert!(!compare(&actual, CompareOp::Matches, &sensitive.into()));
}

#[test]
fn test_nil_semantics() {
    let nil = Value::Nil;
    assert!(compare(&nil, CompareOp::Eq, &Value::Nil));
    assert!(!compare(&nil, CompareOp::Ge, &Value::Integer(3)));
    assert!(!compare(&nil, CompareOp::Matches, &lit("/x/")));
}

#[test]
fn test_empty_string_never_orders_or_matches() {
    assert!(!compare(&Value::from(""), CompareOp::Lt, &Value::Integer(3)));
    assert!(!compare(&Value::from(""), CompareOp::Matches, &lit("/.+/")));
}

#[test]
fn test_values_from_json_resources() {
    let passwords = Value::try_from(json!(["x"])).unwrap();
    assert!(compare(&passwords, CompareOp::Eq, &Value::from("x")));

    let usernames = Value::try_from(json!(["root", "daemon"])).unwrap();
    assert!(!compare(&usernames, CompareOp::Eq, &Value::from("root")));

    assert!(matches!(
        Value::try_from(json!({"Port": "22"})),
        Err(CmpError::UnsupportedValue(_))
    ));
}

// ============================================================================
// Matcher language
// ============================================================================

#[test]
fn test_expressions_against_literals() {
    assert!(holds("'22'", "cmp 22.0"));
    assert!(holds("'22'", "should_not cmp 22.1"));
    assert!(holds("122", "cmp <= 122"));
    assert!(holds("122", "should_not cmp < 122"));
    assert!(holds("0o640", "cmp == '416'"));
    assert!(holds("0o640", "cmp /416$/"));
    assert!(holds("['some-array']", "cmp 'some-array'"));
    assert!(holds("nil", "should_not cmp /something/"));
    assert!(holds("['root', 'daemon']", "should_not cmp 'root'"));
}

#[test]
fn test_unknown_operator_is_an_error() {
    assert!(matches!(
        "!=".parse::<CompareOp>(),
        Err(CmpError::UnknownOperator(_))
    ));
    assert!(cmp::parse("cmp").is_err());
}

// ============================================================================
// Suite files
// ============================================================================

#[test]
fn test_compare_matcher_suite_passes() {
    let suite = SuiteLoader::new()
        .load_suite(&*SUITE_PATH)
        .expect("Failed to load suite");
    let report = run_suite(&suite);

    let failures: Vec<_> = report
        .checks
        .iter()
        .flat_map(|c| c.results.iter().map(move |r| (&c.name, r)))
        .filter(|(_, r)| r.status != Status::Passed)
        .collect();
    assert!(failures.is_empty(), "unexpected failures: {:#?}", failures);

    assert_eq!(report.checks.len(), 12);
    assert_eq!(report.total(), report.passed);
    assert!(report.success());
}

#[test]
fn test_suite_reports_failures_without_stopping() {
    let yaml = r#"
name: broken
checks:
  - describe: VERBOSE
    it:
      - cmp 'info'
      - cmp unquoted
      - cmp 'verbose'
"#;
    let report = run_suite(&SuiteLoader::parse_yaml(yaml).unwrap());

    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors, 1);
    assert!(!report.success());

    let statuses: Vec<Status> = report.checks[0].results.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![Status::Failed, Status::Error, Status::Passed]);
}
