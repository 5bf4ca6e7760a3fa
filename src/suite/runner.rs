// SPDX-License-Identifier: MIT

//! Suite runner
//!
//! Evaluates every expectation of every check. A malformed expectation is
//! recorded as an error for that line only; the rest of the suite still runs.

use super::types::{CheckDefinition, SuiteDefinition};
use crate::cmp::{self, Value};
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Status of a single expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpectationResult {
    pub expression: String,
    pub status: Status,
    /// Failure message, or the error for malformed expressions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub results: Vec<ExpectationResult>,
}

/// Outcome of a whole suite
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub suite: String,
    pub checks: Vec<CheckResult>,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl Report {
    pub fn success(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// Pretty-printed JSON form of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run all checks of a suite
pub fn run_suite(suite: &SuiteDefinition) -> Report {
    log::info!("Running suite: {}", suite.name);

    let checks: Vec<CheckResult> = suite.checks.iter().map(run_check).collect();

    let count = |status: Status| {
        checks
            .iter()
            .flat_map(|c| &c.results)
            .filter(|r| r.status == status)
            .count()
    };
    let report = Report {
        suite: suite.name.clone(),
        passed: count(Status::Passed),
        failed: count(Status::Failed),
        errors: count(Status::Error),
        checks,
    };

    log::info!(
        "Suite '{}': {} passed, {} failed, {} errors",
        report.suite,
        report.passed,
        report.failed,
        report.errors
    );
    report
}

/// Run one check against its subject
pub fn run_check(check: &CheckDefinition) -> CheckResult {
    let subject = Value::try_from(check.describe.clone());
    let name = match (&check.name, &subject) {
        (Some(name), _) => name.clone(),
        (None, Ok(value)) => value.to_string(),
        (None, Err(_)) => "<invalid subject>".to_string(),
    };

    let results = check
        .it
        .iter()
        .map(|expression| match &subject {
            Ok(actual) => run_expectation(actual, expression),
            Err(e) => ExpectationResult {
                expression: expression.clone(),
                status: Status::Error,
                message: Some(e.to_string()),
            },
        })
        .collect();

    CheckResult { name, results }
}

fn run_expectation(actual: &Value, expression: &str) -> ExpectationResult {
    match cmp::parse(expression) {
        Ok(expectation) => {
            let outcome = expectation.evaluate(actual);
            if !outcome.passed {
                log::debug!("{}", outcome.message);
            }
            ExpectationResult {
                expression: expression.to_string(),
                status: if outcome.passed {
                    Status::Passed
                } else {
                    Status::Failed
                },
                message: (!outcome.passed).then_some(outcome.message),
            }
        }
        Err(e) => {
            log::warn!("Skipping malformed expectation '{}': {}", expression, e);
            ExpectationResult {
                expression: expression.to_string(),
                status: Status::Error,
                message: Some(e.to_string()),
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.suite)?;
        for check in &self.checks {
            writeln!(f, "  {}", check.name)?;
            for result in &check.results {
                let mark = match result.status {
                    Status::Passed => "ok",
                    Status::Failed => "FAIL",
                    Status::Error => "ERROR",
                };
                write!(f, "    [{}] {}", mark, result.expression)?;
                if let Some(message) = &result.message {
                    write!(f, ": {}", message)?;
                }
                writeln!(f)?;
            }
        }
        write!(
            f,
            "{} expectations, {} passed, {} failed, {} errors",
            self.total(),
            self.passed,
            self.failed,
            self.errors
        )
    }
}
