//! Shared fixtures for termplan tests.
//!
//! Builders here panic on malformed input: a bad fixture is a bug in the
//! test, not something to recover from.

use termplan_core::plan::{Course, Plan};
use termplan_core::requisite::CourseCode;
use termplan_core::term::TermLevel;

/// Normalize a course code, panicking if it is not one.
pub fn code(raw: &str) -> CourseCode {
    CourseCode::parse(raw).unwrap_or_else(|| panic!("fixture code {raw:?} is not a course code"))
}

/// A catalog course with no requisites.
pub fn course(raw: &str) -> Course {
    Course::new(code(raw))
}

/// A catalog course with requisite text.
pub fn course_with(raw: &str, requisites: &str) -> Course {
    Course::new(code(raw)).requisites(requisites)
}

/// Term index for a label such as `"2A"`.
pub fn term(label: &str) -> usize {
    let level: TermLevel = label
        .parse()
        .unwrap_or_else(|e| panic!("fixture term {label:?}: {e}"));
    level.ordinal() as usize
}

/// Chained construction of a [`Plan`].
pub struct PlanBuilder {
    plan: Plan,
}

impl PlanBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            plan: Plan::new(name),
        }
    }

    /// Place a course in the term with the given label.
    pub fn place(mut self, label: &str, course: Course) -> Self {
        self.plan
            .place(term(label), course)
            .unwrap_or_else(|e| panic!("fixture placement in {label}: {e}"));
        self
    }

    /// Place several requisite-free courses in one term.
    pub fn fill(mut self, label: &str, codes: &[&str]) -> Self {
        for raw in codes {
            self = self.place(label, course(raw));
        }
        self
    }

    pub fn build(self) -> Plan {
        self.plan
    }
}

/// The plan used by end-to-end tests: `ECE 250` in 1B needs `ECE 105` (1A)
/// and clashes with `CS 241` (2B).
pub const SAMPLE_PLAN_TOML: &str = r#"
[plan]
name = "Computer Engineering 2026"
program = "Computer Engineering"

[[courses]]
code = "ECE 105"
title = "Classical Mechanics"
units = 0.5

[[courses]]
code = "ECE 250"
title = "Algorithms and Data Structures"
requisites = "Prereq: ECE 105; Antireq: CS 241"
units = 0.5

[[courses]]
code = "CS 241"
title = "Foundations of Sequential Programs"
requisites = "Prereq: CS 136"
units = 0.5

[[terms]]
label = "1A"
courses = ["ECE 105"]

[[terms]]
label = "1B"
courses = ["ECE 250"]

[[terms]]
label = "2B"
courses = ["CS 241"]
"#;
