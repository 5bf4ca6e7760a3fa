// SPDX-License-Identifier: MIT

//! Assertion wrapper around `compare`

use super::ast::Expectation;
use super::comparator::compare;
use super::value::Value;
use serde::Serialize;

/// Result of checking one expectation against an actual value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub passed: bool,
    /// `expected <actual> to <verb> <expected>`, phrased for the failure case
    pub message: String,
}

impl Expectation {
    /// Run the comparison and honour `should_not`.
    pub fn evaluate(&self, actual: &Value) -> Outcome {
        let matched = compare(actual, self.op, &self.expected);
        let passed = matched != self.negated;

        Outcome {
            passed,
            message: self.failure_message(actual),
        }
    }

    pub fn failure_message(&self, actual: &Value) -> String {
        let sense = if self.negated { "not to" } else { "to" };
        format!(
            "expected {} {} {} {}",
            actual,
            sense,
            self.effective_op().verb(),
            self.expected
        )
    }
}
