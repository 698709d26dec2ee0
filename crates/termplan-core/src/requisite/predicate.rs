//! Typed requisite predicates and their evaluation.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::code::CourseCode;
use crate::term::TermLevel;

/// How the courses of a [`Predicate::Course`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Every listed course must be completed.
    All,
    /// At least one listed course must be completed.
    Any,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// One requisite clause in structured form.
///
/// Every variant keeps the verbatim clause (`raw`) it was parsed from and a
/// `group_id` that is unique within one parse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Courses that must be completed in an earlier term.
    ///
    /// `operator` is `None` for a single-course clause, which evaluates as
    /// all-of-one.
    Course {
        operator: Option<Operator>,
        courses: Vec<CourseCode>,
        raw: String,
        group_id: u32,
    },
    /// A minimum program level, e.g. "Level at least 3A Computer Engineering".
    Level {
        level: TermLevel,
        program: Option<String>,
        raw: String,
        group_id: u32,
    },
    /// Courses to be taken concurrently or earlier.
    Corequisite {
        courses: Vec<CourseCode>,
        raw: String,
        group_id: u32,
    },
    /// Courses that must not appear anywhere else in the plan.
    Antirequisite {
        courses: Vec<CourseCode>,
        raw: String,
        group_id: u32,
    },
}

impl Predicate {
    /// The clause text this predicate was parsed from.
    pub fn raw(&self) -> &str {
        match self {
            Self::Course { raw, .. }
            | Self::Level { raw, .. }
            | Self::Corequisite { raw, .. }
            | Self::Antirequisite { raw, .. } => raw,
        }
    }

    pub fn group_id(&self) -> u32 {
        match self {
            Self::Course { group_id, .. }
            | Self::Level { group_id, .. }
            | Self::Corequisite { group_id, .. }
            | Self::Antirequisite { group_id, .. } => *group_id,
        }
    }

    /// Courses referenced by this predicate (empty for level requirements).
    pub fn courses(&self) -> &[CourseCode] {
        match self {
            Self::Course { courses, .. }
            | Self::Corequisite { courses, .. }
            | Self::Antirequisite { courses, .. } => courses,
            Self::Level { .. } => &[],
        }
    }

    /// Short name of the variant, matching its serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Course { .. } => "course",
            Self::Level { .. } => "level",
            Self::Corequisite { .. } => "corequisite",
            Self::Antirequisite { .. } => "antirequisite",
        }
    }

    pub fn is_satisfied(
        &self,
        completed: &HashSet<CourseCode>,
        current_level: Option<TermLevel>,
    ) -> bool {
        is_satisfied(self, completed, current_level)
    }

    pub fn describe(&self) -> String {
        describe(self)
    }
}

/// Decide whether `predicate` holds for a student who has completed
/// `completed` and is currently at `current_level`.
///
/// Antirequisites are "satisfied" when none of their courses is completed;
/// the plan validator additionally scans the whole plan for them.
pub fn is_satisfied(
    predicate: &Predicate,
    completed: &HashSet<CourseCode>,
    current_level: Option<TermLevel>,
) -> bool {
    match predicate {
        Predicate::Course {
            operator, courses, ..
        } => {
            if courses.is_empty() {
                return true;
            }
            match operator {
                Some(Operator::Any) => courses.iter().any(|c| completed.contains(c)),
                Some(Operator::All) | None => courses.iter().all(|c| completed.contains(c)),
            }
        }
        Predicate::Level { level, .. } => current_level.is_some_and(|cur| cur >= *level),
        Predicate::Corequisite { courses, .. } => {
            courses.is_empty() || courses.iter().any(|c| completed.contains(c))
        }
        Predicate::Antirequisite { courses, .. } => !courses.iter().any(|c| completed.contains(c)),
    }
}

/// One-line, human-readable summary of a predicate.
pub fn describe(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Course {
            operator,
            courses,
            raw,
            ..
        } => {
            if courses.is_empty() {
                return raw.clone();
            }
            let list = join_codes(courses);
            match operator {
                Some(Operator::Any) => format!("One of: {list}"),
                Some(Operator::All) => format!("All of: {list}"),
                None => list,
            }
        }
        Predicate::Level { level, program, .. } => match program {
            Some(p) => format!("Level {level} or higher in {p}"),
            None => format!("Level {level} or higher"),
        },
        Predicate::Corequisite { courses, raw, .. } => {
            format!("Corequisite: {}", list_or_raw(courses, raw))
        }
        Predicate::Antirequisite { courses, raw, .. } => {
            format!("Cannot take with: {}", list_or_raw(courses, raw))
        }
    }
}

fn join_codes(courses: &[CourseCode]) -> String {
    courses
        .iter()
        .map(CourseCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn list_or_raw(courses: &[CourseCode], raw: &str) -> String {
    if courses.is_empty() {
        raw.to_owned()
    } else {
        join_codes(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CourseCode {
        CourseCode::parse(s).expect("valid code")
    }

    fn completed(codes: &[&str]) -> HashSet<CourseCode> {
        codes.iter().map(|c| code(c)).collect()
    }

    fn course_pred(operator: Option<Operator>, codes: &[&str]) -> Predicate {
        Predicate::Course {
            operator,
            courses: codes.iter().map(|c| code(c)).collect(),
            raw: "raw".into(),
            group_id: 0,
        }
    }

    #[test]
    fn any_needs_one_completed() {
        let p = course_pred(Some(Operator::Any), &["ECE 250", "CS 240"]);
        assert!(p.is_satisfied(&completed(&["CS 240"]), None));
        assert!(!p.is_satisfied(&completed(&["MATH 117"]), None));
    }

    #[test]
    fn all_and_single_need_every_course() {
        let all = course_pred(Some(Operator::All), &["ECE 250", "CS 240"]);
        assert!(!all.is_satisfied(&completed(&["CS 240"]), None));
        assert!(all.is_satisfied(&completed(&["CS 240", "ECE 250"]), None));

        let single = course_pred(None, &["ECE 250"]);
        assert!(single.is_satisfied(&completed(&["ECE 250"]), None));
        assert!(!single.is_satisfied(&HashSet::new(), None));
    }

    #[test]
    fn level_requires_current_level() {
        let p = Predicate::Level {
            level: "3A".parse().unwrap(),
            program: None,
            raw: "Level at least 3A".into(),
            group_id: 0,
        };
        assert!(!p.is_satisfied(&HashSet::new(), None));
        assert!(!p.is_satisfied(&HashSet::new(), Some("2B".parse().unwrap())));
        assert!(p.is_satisfied(&HashSet::new(), Some("3A".parse().unwrap())));
        assert!(p.is_satisfied(&HashSet::new(), Some("4B".parse().unwrap())));
    }

    #[test]
    fn corequisite_and_antirequisite() {
        let coreq = Predicate::Corequisite {
            courses: vec![code("ECE 205")],
            raw: "Coreq: ECE 205".into(),
            group_id: 0,
        };
        assert!(coreq.is_satisfied(&completed(&["ECE 205"]), None));
        assert!(!coreq.is_satisfied(&HashSet::new(), None));

        let anti = Predicate::Antirequisite {
            courses: vec![code("SE 463")],
            raw: "Antireq: SE 463".into(),
            group_id: 1,
        };
        assert!(anti.is_satisfied(&HashSet::new(), None));
        assert!(!anti.is_satisfied(&completed(&["SE 463"]), None));
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            course_pred(Some(Operator::Any), &["ECE 250", "CS 240"]).describe(),
            "One of: ECE 250, CS 240"
        );
        assert_eq!(
            course_pred(Some(Operator::All), &["ECE 250", "CS 240"]).describe(),
            "All of: ECE 250, CS 240"
        );
        assert_eq!(course_pred(None, &["ECE 105"]).describe(), "ECE 105");

        let level = Predicate::Level {
            level: "3A".parse().unwrap(),
            program: Some("Computer Engineering".into()),
            raw: String::new(),
            group_id: 0,
        };
        assert_eq!(level.describe(), "Level 3A or higher in Computer Engineering");

        let anti = Predicate::Antirequisite {
            courses: vec![code("SE 463")],
            raw: String::new(),
            group_id: 0,
        };
        assert_eq!(anti.describe(), "Cannot take with: SE 463");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(course_pred(Some(Operator::Any), &["ECE 250"])).unwrap();
        assert_eq!(json["kind"], "course");
        assert_eq!(json["operator"], "any");
        assert_eq!(json["courses"][0], "ECE 250");
    }
}
