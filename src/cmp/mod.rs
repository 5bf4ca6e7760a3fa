// SPDX-License-Identifier: MIT

//! The `cmp` matcher
//!
//! This module provides the flexible comparator and the matcher language
//! built on it. Expectations are written like:
//! - `cmp 22` (also true for `'22'` and `22.0`)
//! - `cmp 'verbose'` (case-insensitive)
//! - `should_not cmp >= 3`
//! - `cmp /^SOME\s\d+/i`

mod ast;
mod comparator;
mod matcher;
mod parser;
mod value;

pub use ast::{CompareOp, Expectation};
pub use comparator::compare;
pub use matcher::Outcome;
pub use parser::{parse, parse_literal};
pub use value::{Pattern, Value, LIST_SEPARATOR};
