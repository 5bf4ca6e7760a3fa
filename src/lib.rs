// SPDX-License-Identifier: MIT

pub mod cmp;
pub mod error;
pub mod suite;

pub use cmp::{compare, CompareOp, Expectation, Value};
pub use error::{CmpError, Result};
