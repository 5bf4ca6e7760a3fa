// SPDX-License-Identifier: MIT

//! Flexible comparison (`cmp`)
//!
//! Unlike strict equality, `compare` coerces operands before comparing:
//! - one-element lists stand for their element
//! - numeric strings compare numerically against numbers (`'22' cmp 22.0`)
//! - strings compare case-insensitively (`'VERBOSE' cmp 'verbose'`)
//! - a regex on the right tests containment in the actual's text
//!
//! A mismatch of kinds is simply `false`; nothing here returns an error.

use super::ast::CompareOp;
use super::value::{format_float, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

pub(super) static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("integer syntax regex"));
pub(super) static OCTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([-+]?)0([0-7]+)$").expect("octal syntax regex"));
pub(super) static FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][-+]?[0-9]+)?$").expect("float syntax regex")
});

/// Compare `actual` against `expected` with `op`, applying coercion.
pub fn compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    let actual = actual.unwrapped();
    let expected = expected.unwrapped();

    let result = match (actual, expected) {
        (Value::Nil, Value::Nil) => op == CompareOp::Eq,
        (Value::Nil, _) | (_, Value::Nil) => false,
        (_, Value::Regex(pattern)) => {
            !op.is_ordering() && pattern.is_match(&actual.stringify())
        }
        _ if op == CompareOp::Matches => actual.stringify().contains(&expected.stringify()),
        (Value::List(left), Value::List(right)) => {
            op == CompareOp::Eq && same_elements(left, right)
        }
        (Value::List(_), _) | (_, Value::List(_)) => false,
        (Value::Boolean(a), Value::Boolean(b)) => op == CompareOp::Eq && a == b,
        (Value::String(a), Value::String(b)) => apply(op, Some(cmp_ignore_case(a, b))),
        _ => match (Number::of(actual), Number::of(expected)) {
            (Some(a), Some(b)) => apply(op, a.compare_to(b)),
            (Some(n), None) => match expected {
                Value::String(s) => number_vs_text(n, s, op, false),
                _ => false,
            },
            (None, Some(n)) => match actual {
                Value::String(s) => number_vs_text(n, s, op, true),
                _ => false,
            },
            (None, None) => false,
        },
    };

    log::debug!(
        "cmp {} ({}) {} {} ({}) => {}",
        actual,
        actual.kind(),
        op,
        expected,
        expected.kind(),
        result
    );
    result
}

/// Order-insensitive element equality, each element matched with `cmp ==`.
fn same_elements(left: &[Value], right: &[Value]) -> bool {
    let covers = |xs: &[Value], ys: &[Value]| {
        xs.iter()
            .all(|x| ys.iter().any(|y| compare(x, CompareOp::Eq, y)))
    };
    covers(left, right) && covers(right, left)
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// `text_on_left` is true when the string is the actual operand.
fn number_vs_text(n: Number, text: &str, op: CompareOp, text_on_left: bool) -> bool {
    match Number::parse(text, matches!(n, Number::Int(_))) {
        Some(parsed) => {
            let ordering = if text_on_left {
                parsed.compare_to(n)
            } else {
                n.compare_to(parsed)
            };
            apply(op, ordering)
        }
        // Unparsable text never orders against a number
        None => op == CompareOp::Eq && n.to_string().eq_ignore_ascii_case(text.trim()),
    }
}

fn apply(op: CompareOp, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Ge => ordering != Ordering::Less,
        CompareOp::Matches => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// Parse numeric text. With `allow_octal`, a leading zero (`0644`)
    /// marks an octal integer, the way file modes are written.
    fn parse(text: &str, allow_octal: bool) -> Option<Self> {
        let text = text.trim();

        if allow_octal {
            if let Some(caps) = OCTAL.captures(text) {
                // Overflowing octal falls through to the decimal readings
                if let Ok(magnitude) = i64::from_str_radix(&caps[2], 8) {
                    let signed = if &caps[1] == "-" { -magnitude } else { magnitude };
                    return Some(Number::Int(signed));
                }
            }
        }

        if INTEGER.is_match(text) {
            if let Ok(n) = text.parse::<i64>() {
                return Some(Number::Int(n));
            }
        }

        if FLOAT.is_match(text) {
            return text.parse::<f64>().ok().map(Number::Float);
        }

        None
    }

    fn compare_to(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::Float(b)) => int_cmp_float(a, b),
            (Number::Float(a), Number::Int(b)) => int_cmp_float(b, a).map(Ordering::reverse),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer through `f64`.
fn int_cmp_float(a: i64, b: f64) -> Option<Ordering> {
    // 2^63, exactly representable
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if b.is_nan() {
        return None;
    }
    let floor = b.floor();
    if floor >= BOUND {
        return Some(Ordering::Less);
    }
    if floor < -BOUND {
        return Some(Ordering::Greater);
    }

    match a.cmp(&(floor as i64)) {
        Ordering::Equal if b.fract() != 0.0 => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}
