//! Requisite text parser.
//!
//! Turns catalog strings such as
//! `"Prereq: One of ECE 250, CS 240; Antireq: SE 463"` into an ordered list
//! of [`Predicate`]s. Classification is best-effort:
//! - Clauses are split on `.` and `;`.
//! - Each clause is matched against the markers `Antireq`, `Coreq`,
//!   `Level at least`, `Prereq` (in that order, case-insensitive).
//! - Unmarked clauses that still mention course codes become an implicit
//!   course requirement; anything else is dropped.
//!
//! Parsing never fails.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::code::{CourseCode, extract_course_codes};
use super::predicate::{Operator, Predicate};
use crate::term::TermLevel;

/// Output of [`parse_requisites`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Predicates in clause order, with `group_id`s counting up from 0.
    pub predicates: Vec<Predicate>,
    /// `true` when at least one predicate was produced.
    pub has_requirements: bool,
    /// The trimmed input text (empty when the input was blank or absent).
    pub raw: String,
}

impl ParseResult {
    fn empty() -> Self {
        Self {
            predicates: Vec::new(),
            has_requirements: false,
            raw: String::new(),
        }
    }
}

fn antireq_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bantireq:?\s*(.+)").expect("antireq regex must compile"))
}

fn coreq_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bcoreq:?\s*(.+)").expect("coreq regex must compile"))
}

fn level_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\blevel\s+at\s+least\s+([0-9]+[ab])\b\s*(.*)")
            .expect("level regex must compile")
    })
}

fn prereq_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bprereq:?\s*(.+)").expect("prereq regex must compile"))
}

fn one_of_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bone\s+of\b").expect("one-of regex must compile"))
}

fn or_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bor\b").expect("or regex must compile"))
}

/// Assigns `group_id`s and collects predicates for one parse call.
struct Collector {
    predicates: Vec<Predicate>,
    next_group: u32,
}

impl Collector {
    fn next_group(&mut self) -> u32 {
        let id = self.next_group;
        self.next_group += 1;
        id
    }

    fn course(&mut self, operator: Option<Operator>, courses: Vec<CourseCode>, raw: &str) {
        let group_id = self.next_group();
        self.predicates.push(Predicate::Course {
            operator,
            courses,
            raw: raw.to_owned(),
            group_id,
        });
    }
}

/// Parse a requisite string into predicates.
///
/// `None`, empty and whitespace-only input yield no predicates and
/// `has_requirements = false`. The result depends only on the input, so
/// repeated calls return identical lists.
pub fn parse_requisites(text: Option<&str>) -> ParseResult {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return ParseResult::empty();
    };

    let mut out = Collector {
        predicates: Vec::new(),
        next_group: 0,
    };

    for clause in text.split(['.', ';']).map(str::trim).filter(|c| !c.is_empty()) {
        classify_clause(clause, &mut out);
    }

    let has_requirements = !out.predicates.is_empty();
    ParseResult {
        predicates: out.predicates,
        has_requirements,
        raw: text.to_owned(),
    }
}

fn classify_clause(clause: &str, out: &mut Collector) {
    if let Some(caps) = antireq_re().captures(clause) {
        let courses = extract_course_codes(&caps[1]);
        if courses.is_empty() {
            debug!(clause, "dropping antirequisite clause without course codes");
            return;
        }
        let group_id = out.next_group();
        out.predicates.push(Predicate::Antirequisite {
            courses,
            raw: clause.to_owned(),
            group_id,
        });
        return;
    }

    if let Some(caps) = coreq_re().captures(clause) {
        let courses = extract_course_codes(&caps[1]);
        if courses.is_empty() {
            debug!(clause, "dropping corequisite clause without course codes");
            return;
        }
        let group_id = out.next_group();
        out.predicates.push(Predicate::Corequisite {
            courses,
            raw: clause.to_owned(),
            group_id,
        });
        return;
    }

    if let Some(caps) = level_re().captures(clause) {
        // The regex only admits `<digits><A|B>`, so this parse only fails on
        // out-of-range years.
        match caps[1].parse::<TermLevel>() {
            Ok(level) => {
                let program = caps[2].trim();
                let group_id = out.next_group();
                out.predicates.push(Predicate::Level {
                    level,
                    program: (!program.is_empty()).then(|| program.to_owned()),
                    raw: clause.to_owned(),
                    group_id,
                });
            }
            Err(e) => debug!(clause, error = %e, "dropping level clause"),
        }
        return;
    }

    if let Some(caps) = prereq_re().captures(clause) {
        let body = &caps[1];
        let courses = extract_course_codes(body);
        if courses.is_empty() {
            debug!(clause, "dropping prerequisite clause without course codes");
            return;
        }
        let operator = if one_of_re().is_match(body)
            || (or_word_re().is_match(body) && !body.contains(','))
        {
            Some(Operator::Any)
        } else if courses.len() > 1 {
            Some(Operator::All)
        } else {
            None
        };
        out.course(operator, courses, clause);
        return;
    }

    let courses = extract_course_codes(clause);
    if courses.is_empty() {
        debug!(clause, "dropping unrecognized clause");
        return;
    }
    out.course(None, courses, clause);
}
