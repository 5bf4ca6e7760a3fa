// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for matcher expressions

use super::value::Value;
use crate::error::CmpError;
use std::str::FromStr;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// ==
    Eq,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Le,
    /// >=
    Ge,
    /// =~ (pattern containment)
    Matches,
}

impl CompareOp {
    /// Whether this operator orders its operands.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            CompareOp::Lt | CompareOp::Gt | CompareOp::Le | CompareOp::Ge
        )
    }

    /// Verb used in assertion messages: "expected 3 to <verb> 4".
    pub fn verb(self) -> &'static str {
        match self {
            CompareOp::Eq => "cmp ==",
            CompareOp::Lt => "cmp <",
            CompareOp::Gt => "cmp >",
            CompareOp::Le => "cmp <=",
            CompareOp::Ge => "cmp >=",
            CompareOp::Matches => "match",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Le => write!(f, "<="),
            CompareOp::Ge => write!(f, ">="),
            CompareOp::Matches => write!(f, "=~"),
        }
    }
}

impl FromStr for CompareOp {
    type Err = CmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Eq),
            "<" => Ok(CompareOp::Lt),
            ">" => Ok(CompareOp::Gt),
            "<=" => Ok(CompareOp::Le),
            ">=" => Ok(CompareOp::Ge),
            "=~" | "matches" => Ok(CompareOp::Matches),
            other => Err(CmpError::UnknownOperator(other.to_string())),
        }
    }
}

/// One `cmp` assertion: `[should_not] cmp <op> <expected>`
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    /// `should_not` / `not` prefix
    pub negated: bool,
    pub op: CompareOp,
    pub expected: Value,
}

impl Expectation {
    pub fn new(op: CompareOp, expected: impl Into<Value>) -> Self {
        Self {
            negated: false,
            op,
            expected: expected.into(),
        }
    }

    /// Same expectation with the sense inverted.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Operator as it reads in messages; a pattern always reads as "match".
    pub fn effective_op(&self) -> CompareOp {
        match (&self.op, &self.expected) {
            (CompareOp::Eq, Value::Regex(_)) => CompareOp::Matches,
            (op, _) => *op,
        }
    }
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "should_not ")?;
        } else {
            write!(f, "should ")?;
        }
        match self.effective_op() {
            CompareOp::Matches => write!(f, "cmp {}", self.expected),
            op => write!(f, "cmp {} {}", op, self.expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmp::value::Pattern;

    #[test]
    fn test_compare_op_display() {
        assert_eq!(format!("{}", CompareOp::Eq), "==");
        assert_eq!(format!("{}", CompareOp::Gt), ">");
        assert_eq!(format!("{}", CompareOp::Ge), ">=");
        assert_eq!(format!("{}", CompareOp::Lt), "<");
        assert_eq!(format!("{}", CompareOp::Le), "<=");
        assert_eq!(format!("{}", CompareOp::Matches), "=~");
    }

    #[test]
    fn test_compare_op_from_str() {
        assert_eq!("<=".parse::<CompareOp>().unwrap(), CompareOp::Le);
        assert_eq!("matches".parse::<CompareOp>().unwrap(), CompareOp::Matches);
        assert!(matches!(
            "!=".parse::<CompareOp>(),
            Err(CmpError::UnknownOperator(op)) if op == "!="
        ));
    }

    #[test]
    fn test_is_ordering() {
        assert!(CompareOp::Lt.is_ordering());
        assert!(CompareOp::Ge.is_ordering());
        assert!(!CompareOp::Eq.is_ordering());
        assert!(!CompareOp::Matches.is_ordering());
    }

    #[test]
    fn test_expectation_display() {
        let exp = Expectation::new(CompareOp::Lt, 133);
        assert_eq!(exp.to_string(), "should cmp < 133");

        let exp = Expectation::new(CompareOp::Eq, Pattern::new("^SOME", "").unwrap()).negate();
        assert_eq!(exp.to_string(), "should_not cmp /^SOME/");
    }

    #[test]
    fn test_effective_op() {
        let exp = Expectation::new(CompareOp::Eq, Pattern::new("122", "").unwrap());
        assert_eq!(exp.effective_op(), CompareOp::Matches);

        let exp = Expectation::new(CompareOp::Eq, "122");
        assert_eq!(exp.effective_op(), CompareOp::Eq);
    }
}
