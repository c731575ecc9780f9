//! Record validation module
//!
//! Supports: room, student
//!
//! # Overview
//!
//! Each record kind has a rule set describing which keys must be present and
//! what they must hold. Validation never fails the run: a record that breaks a
//! rule is reported as `false` (with a diagnostic) and the caller drops it.

mod rules;

pub use rules::{check, check_value, validate, ValidationIssue};
