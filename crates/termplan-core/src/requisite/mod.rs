//! Requisite handling: course codes, predicate parsing and evaluation.

pub mod code;
pub mod parser;
pub mod predicate;

pub use code::{CourseCode, extract_course_codes};
pub use parser::{ParseResult, parse_requisites};
pub use predicate::{Operator, Predicate, describe, is_satisfied};
