// SPDX-License-Identifier: MIT

//! Check suites
//!
//! A suite is a YAML file listing subjects (`describe`) and the `cmp`
//! expectations each must satisfy (`it`).

pub mod loader;
pub mod runner;
pub mod types;

pub use loader::SuiteLoader;
pub use runner::{run_check, run_suite, CheckResult, ExpectationResult, Report, Status};
pub use types::{CheckDefinition, SuiteDefinition};
