// SPDX-License-Identifier: MIT

//! Values flowing through the comparator
//!
//! `Value` is the closed set of kinds a check can produce or expect.
//! Resources hand over YAML or JSON data; both convert into `Value`
//! without loss for every kind the comparator understands.

use crate::error::{CmpError, Result};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Separator used when a multi-element list is rendered as text for
/// matches mode.
pub const LIST_SEPARATOR: &str = "\n";

/// A value on either side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Regex(Pattern),
}

impl Value {
    /// Strip one-element lists down to their sole element, repeatedly.
    pub fn unwrapped(&self) -> &Value {
        let mut current = self;
        while let Value::List(items) = current {
            match items.as_slice() {
                [only] => current = only,
                _ => break,
            }
        }
        current
    }

    /// Plain text form used when testing a pattern against the value.
    ///
    /// Unlike `Display`, strings are not quoted and list elements are
    /// joined with [`LIST_SEPARATOR`].
    pub fn stringify(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::stringify)
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            Value::Regex(p) => p.source().to_string(),
        }
    }

    /// Short name of the value's kind, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Regex(_) => "regex",
        }
    }
}

pub(crate) fn format_float(f: f64) -> String {
    // Debug keeps the trailing ".0" so 22.0 never renders as 22
    format!("{:?}", f)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Regex(p) => write!(f, "{}", p),
        }
    }
}

/// A compiled regular expression that remembers how it was written
///
/// `^` and `$` always anchor at line boundaries. Supported flags:
/// `i` (case-insensitive), `m` (`.` matches newline), `x` (extended).
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        let mut builder = RegexBuilder::new(source);
        builder.multi_line(true);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                other => {
                    return Err(CmpError::parse(
                        format!("/{}/{}", source, flags),
                        format!("unsupported regex flag '{}'", other),
                    ))
                }
            };
        }
        let regex = builder.build().map_err(|e| CmpError::InvalidRegex {
            pattern: source.to_string(),
            source: e,
        })?;

        Ok(Self {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Containment test, not a full match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source.replace('/', "\\/"), self.flags)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Regex(p)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Nil)
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = CmpError;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        use serde_yaml::Value as Yaml;

        match value {
            Yaml::Null => Ok(Value::Nil),
            Yaml::Bool(b) => Ok(Value::Boolean(b)),
            Yaml::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Integer(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| CmpError::unsupported(format!("number {}", n))),
            },
            Yaml::String(s) => Ok(Value::String(s)),
            Yaml::Sequence(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            Yaml::Mapping(_) => Err(CmpError::unsupported("YAML mapping")),
            // Tags carry no meaning for comparison
            Yaml::Tagged(tagged) => Value::try_from(tagged.value),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = CmpError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        match value {
            Json::Null => Ok(Value::Nil),
            Json::Bool(b) => Ok(Value::Boolean(b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Integer(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| CmpError::unsupported(format!("number {}", n))),
            },
            Json::String(s) => Ok(Value::String(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            Json::Object(_) => Err(CmpError::unsupported("JSON object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::from("VERBOSE").to_string(), "\"VERBOSE\"");
        assert_eq!(Value::from(22).to_string(), "22");
        assert_eq!(Value::from(22.0).to_string(), "22.0");
        assert_eq!(Value::from(vec!["x", "y"]).to_string(), "[\"x\", \"y\"]");
        let p = Pattern::new("^SOME", "i").unwrap();
        assert_eq!(Value::from(p).to_string(), "/^SOME/i");
    }

    #[test]
    fn test_stringify() {
        assert_eq!(Value::from("some 123").stringify(), "some 123");
        assert_eq!(Value::from(416).stringify(), "416");
        assert_eq!(Value::from(vec!["root", "daemon"]).stringify(), "root\ndaemon");
        assert_eq!(Value::List(vec![]).stringify(), "");
    }

    #[test]
    fn test_unwrapped() {
        let single = Value::from(vec!["x"]);
        assert_eq!(single.unwrapped(), &Value::from("x"));

        let nested = Value::List(vec![Value::from(vec![7])]);
        assert_eq!(nested.unwrapped(), &Value::Integer(7));

        let many = Value::from(vec!["a", "b"]);
        assert_eq!(many.unwrapped(), &many);
    }

    #[test]
    fn test_pattern_flags() {
        let p = Pattern::new("^SOME", "").unwrap();
        assert!(!p.is_match("some 123"));

        let p = Pattern::new("^SOME", "i").unwrap();
        assert!(p.is_match("some 123"));

        // line anchors
        let p = Pattern::new("^daemon$", "").unwrap();
        assert!(p.is_match("root\ndaemon"));
    }

    #[test]
    fn test_pattern_rejects_unknown_flag() {
        assert!(matches!(
            Pattern::new("abc", "q"),
            Err(CmpError::Parse { .. })
        ));
    }

    #[test]
    fn test_pattern_invalid_regex() {
        assert!(matches!(
            Pattern::new("(unclosed", ""),
            Err(CmpError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let v = Value::try_from(json!(["x", 1, 2.5, null, true])).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::from("x"),
                Value::Integer(1),
                Value::Float(2.5),
                Value::Nil,
                Value::Boolean(true),
            ])
        );

        assert!(Value::try_from(json!({"a": 1})).is_err());
    }

    #[test]
    fn test_from_yaml() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("[22, '22', ~, 1.5]").unwrap();
        let v = Value::try_from(yaml).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Integer(22),
                Value::from("22"),
                Value::Nil,
                Value::Float(1.5),
            ])
        );

        let mapping: serde_yaml::Value = serde_yaml::from_str("a: 1").unwrap();
        assert!(matches!(
            Value::try_from(mapping),
            Err(CmpError::UnsupportedValue(_))
        ));
    }
}
