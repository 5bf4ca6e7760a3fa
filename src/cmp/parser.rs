// SPDX-License-Identifier: MIT

//! Matcher expression parser
//!
//! Parses expectations like:
//! - `cmp 22`
//! - `should cmp <= 122`
//! - `should_not cmp /^SOME/i`
//! - `cmp == '416'`
//! - `cmp ['x']`

use super::ast::{CompareOp, Expectation};
use super::comparator::{FLOAT, INTEGER, OCTAL};
use super::value::{Pattern, Value};
use crate::error::{CmpError, Result};

/// Parse a matcher expression into an `Expectation`
pub fn parse(input: &str) -> Result<Expectation> {
    let input = input.trim();
    let (negated, rest) = strip_negation(input);

    let rest = rest
        .strip_prefix("cmp")
        .filter(|r| !r.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
        .ok_or_else(|| CmpError::parse(input, "expected 'cmp'"))?
        .trim_start();

    let (op, literal) = split_operator(rest);
    if literal.is_empty() {
        return Err(CmpError::parse(input, "missing expected value"));
    }
    let expected = parse_literal(literal)?;

    Ok(Expectation {
        negated,
        op,
        expected,
    })
}

fn strip_negation(input: &str) -> (bool, &str) {
    // Longest first, "should_not" starts with "should"
    let prefixes = [
        ("should_not ", true),
        ("should not ", true),
        ("should ", false),
        ("not ", true),
    ];
    for (prefix, negated) in prefixes {
        if let Some(rest) = input.strip_prefix(prefix) {
            return (negated, rest.trim_start());
        }
    }
    (false, input)
}

fn split_operator(input: &str) -> (CompareOp, &str) {
    let operators = [
        ("<=", CompareOp::Le),
        (">=", CompareOp::Ge),
        ("==", CompareOp::Eq),
        ("=~", CompareOp::Matches),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
        ("matches ", CompareOp::Matches),
    ];
    for (op_str, op) in operators {
        if let Some(rest) = input.strip_prefix(op_str) {
            return (op, rest.trim());
        }
    }
    (CompareOp::Eq, input.trim())
}

/// Parse a single literal value
pub fn parse_literal(input: &str) -> Result<Value> {
    let input = input.trim();

    match input {
        "" => return Err(CmpError::parse(input, "empty literal")),
        "nil" | "null" => return Ok(Value::Nil),
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        _ => {}
    }

    if input.starts_with('[') {
        return parse_list(input);
    }
    if input.starts_with('\'') || input.starts_with('"') {
        return parse_string(input).map(Value::String);
    }
    if input.starts_with('/') {
        return parse_regex(input).map(Value::Regex);
    }
    if let Some(n) = parse_integer(input) {
        return Ok(Value::Integer(n));
    }
    if FLOAT.is_match(input) {
        if let Ok(f) = input.parse::<f64>() {
            return Ok(Value::Float(f));
        }
    }

    Err(CmpError::parse(input, "could not parse literal"))
}

fn parse_integer(input: &str) -> Option<i64> {
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if digits.starts_with(['+', '-']) {
        return None;
    }

    let radix_prefixes = [("0o", 8), ("0O", 8), ("0x", 16), ("0X", 16), ("0b", 2), ("0B", 2)];
    let magnitude = match radix_prefixes
        .iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(*prefix).map(|d| (d, *radix)))
    {
        Some((body, _)) if body.starts_with(['+', '-']) => return None,
        Some((body, radix)) => i64::from_str_radix(body, radix).ok()?,
        None if OCTAL.is_match(digits) => i64::from_str_radix(&digits[1..], 8).ok()?,
        None if INTEGER.is_match(digits) => digits.parse::<i64>().ok()?,
        None => return None,
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_string(input: &str) -> Result<String> {
    let mut chars = input.chars();
    let quote = chars
        .next()
        .ok_or_else(|| CmpError::parse(input, "empty string literal"))?;

    let mut out = String::new();
    let mut closed = false;
    while let Some(c) = chars.next() {
        if closed {
            return Err(CmpError::parse(input, "trailing characters after string"));
        }
        match c {
            '\\' => match chars.next() {
                Some('n') if quote == '"' => out.push('\n'),
                Some('t') if quote == '"' => out.push('\t'),
                Some(escaped) => out.push(escaped),
                None => return Err(CmpError::parse(input, "dangling escape")),
            },
            c if c == quote => closed = true,
            c => out.push(c),
        }
    }

    if !closed {
        return Err(CmpError::parse(input, "unterminated string"));
    }
    Ok(out)
}

fn parse_regex(input: &str) -> Result<Pattern> {
    let body = &input[1..];
    let mut escaped = false;
    let close = body
        .char_indices()
        .find(|&(_, c)| {
            let closes = c == '/' && !escaped;
            escaped = c == '\\' && !escaped;
            closes
        })
        .map(|(i, _)| i)
        .ok_or_else(|| CmpError::parse(input, "unterminated regex"))?;
    let (source, flags) = (&body[..close], &body[close + 1..]);
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CmpError::parse(input, "trailing characters after regex"));
    }
    Pattern::new(&source.replace("\\/", "/"), flags)
}

fn parse_list(input: &str) -> Result<Value> {
    let inner = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| CmpError::parse(input, "unterminated list"))?;

    if inner.trim().is_empty() {
        return Ok(Value::List(vec![]));
    }

    split_top_level(inner)?
        .into_iter()
        .map(parse_literal)
        .collect::<Result<Vec<_>>>()
        .map(Value::List)
}

/// Split list items on commas that sit outside quotes, regexes and
/// nested lists.
fn split_top_level(input: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut delimiter: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    let mut at_item_start = true;

    for (i, c) in input.char_indices() {
        if let Some(d) = delimiter {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == d {
                delimiter = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => delimiter = Some(c),
            '/' if at_item_start => delimiter = Some('/'),
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| CmpError::parse(input, "unbalanced ']'"))?;
            }
            ',' if depth == 0 => {
                parts.push(input[start..i].trim());
                start = i + 1;
                at_item_start = true;
                continue;
            }
            _ => {}
        }
        if !c.is_whitespace() {
            at_item_start = false;
        }
    }

    if delimiter.is_some() || depth != 0 {
        return Err(CmpError::parse(input, "unterminated list item"));
    }
    parts.push(input[start..].trim());

    if parts.iter().any(|p| p.is_empty()) {
        return Err(CmpError::parse(input, "empty list item"));
    }
    Ok(parts)
}
