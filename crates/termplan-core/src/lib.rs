//! Requisite parsing and term-aware validation for multi-term academic plans.
//!
//! The crate is pure: every entry point takes its inputs by reference and
//! returns fresh values. Persistence, catalog sync and rendering live
//! outside of it.

pub mod config;
pub mod plan;
pub mod requisite;
pub mod term;
pub mod validate;

pub use config::{ConfigError, ValidatorConfig};
pub use plan::{Course, CourseId, Plan, PlannedCourse, Term};
pub use requisite::{CourseCode, Operator, ParseResult, Predicate, parse_requisites};
pub use term::TermLevel;
pub use validate::{Diagnostic, DiagnosticKind, Severity, ValidationResult, Validator};
