//! Plan validator: checks a course placement (or every placement) against
//! the plan it sits in.
//!
//! For a course in term `t` the checks run in this order:
//! 1. Duplicate placement in any other term (warning).
//! 2. Requisites against courses in terms before `t`: course requirements
//!    are errors, level and corequisite requirements are warnings.
//! 3. Antirequisites against every course in the plan (error).
//! 4. Term overload past [`ValidatorConfig::max_courses_per_term`] (warning).
//!
//! The validator never mutates the plan and never fails; bad requisite text
//! degrades to fewer predicates.

pub mod diagnostic;

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::plan::{Course, Plan};
use crate::requisite::{CourseCode, Predicate, parse_requisites};
use crate::term::{TermLevel, term_label};

pub use diagnostic::{
    Diagnostic, DiagnosticKind, DiagnosticKindParseError, Severity, SeverityParseError,
    ValidationResult, dedup_diagnostics,
};

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validates plans with a fixed [`ValidatorConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given limits.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// What-if check: would adding `candidate` to `term_index` be valid?
    ///
    /// `candidate` is not expected to be in the plan yet. A `term_index`
    /// past the last term is checked as an empty term after the plan end.
    pub fn validate_addition(
        &self,
        plan: &Plan,
        term_index: usize,
        candidate: &Course,
    ) -> ValidationResult {
        let already_in_term = plan.term(term_index).map(|t| t.courses.len());
        let diagnostics = self.check_course(plan, term_index, candidate, already_in_term);
        ValidationResult::from_diagnostics(diagnostics)
    }

    /// Check every placed course as though it were being added to its own
    /// term, then collapse repeated findings.
    ///
    /// Each course is replayed in display order, so an overloaded term warns
    /// on the courses that push it past the limit.
    pub fn validate_plan(&self, plan: &Plan) -> ValidationResult {
        let mut diagnostics = Vec::new();

        for term in plan.terms() {
            let mut placed: Vec<_> = term.courses.iter().collect();
            placed.sort_by_key(|pc| pc.position);

            for (rank, pc) in placed.into_iter().enumerate() {
                diagnostics.extend(self.check_course(plan, term.index, &pc.course, Some(rank)));
            }
        }

        let result = ValidationResult::from_diagnostics(diagnostics).dedup();
        debug!(
            plan = %plan.name,
            courses = plan.course_count(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated plan"
        );
        result
    }

    /// Run all checks for one course. `already_in_term` is the number of
    /// courses the term holds before `candidate` is counted, or `None` when
    /// the term does not exist.
    fn check_course(
        &self,
        plan: &Plan,
        term_index: usize,
        candidate: &Course,
        already_in_term: Option<usize>,
    ) -> Vec<Diagnostic> {
        let mut out = Vec::new();

        check_duplicate(plan, term_index, candidate, &mut out);

        let predicates = requisite_predicates(candidate);
        trace!(
            course = %candidate.code,
            term = term_index,
            predicates = predicates.len(),
            "checking course"
        );
        if !predicates.is_empty() {
            check_requisites(plan, term_index, candidate, &predicates, &mut out);
            check_antirequisites(plan, candidate, &predicates, &mut out);
        }

        if let Some(existing) = already_in_term {
            self.check_overload(existing + 1, candidate, &mut out);
        }

        out
    }

    fn check_overload(&self, count: usize, candidate: &Course, out: &mut Vec<Diagnostic>) {
        let max = self.config.max_courses_per_term;
        if count > max {
            out.push(Diagnostic::new(
                DiagnosticKind::Overload,
                candidate.code.clone(),
                format!("Term overload: {count} courses"),
                format!(
                    "This term has more than {max} courses. Consider redistributing courses to maintain balance."
                ),
            ));
        }
    }
}

/// [`Validator::validate_addition`] with the default limits.
pub fn validate_addition(plan: &Plan, term_index: usize, candidate: &Course) -> ValidationResult {
    Validator::default().validate_addition(plan, term_index, candidate)
}

/// [`Validator::validate_plan`] with the default limits.
pub fn validate_plan(plan: &Plan) -> ValidationResult {
    Validator::default().validate_plan(plan)
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Parsed requisites of `course`, or nothing when the catalog flags it as
/// having none.
fn requisite_predicates(course: &Course) -> Vec<Predicate> {
    if !course.has_requirements {
        return Vec::new();
    }
    parse_requisites(course.requisites.as_deref()).predicates
}

fn check_duplicate(plan: &Plan, term_index: usize, candidate: &Course, out: &mut Vec<Diagnostic>) {
    let other = plan.terms().iter().find(|t| {
        t.index != term_index && t.courses.iter().any(|pc| pc.course.id == candidate.id)
    });
    if let Some(term) = other {
        out.push(Diagnostic::new(
            DiagnosticKind::Duplicate,
            candidate.code.clone(),
            format!("Course already exists in {}", term.label),
            "You may want to remove the duplicate course from one of the terms.",
        ));
    }
}

fn check_requisites(
    plan: &Plan,
    term_index: usize,
    candidate: &Course,
    predicates: &[Predicate],
    out: &mut Vec<Diagnostic>,
) {
    let completed = plan.codes_before(term_index);
    let current_level = TermLevel::from_index(term_index);

    for predicate in predicates {
        if predicate.is_satisfied(&completed, Some(current_level)) {
            continue;
        }
        let description = predicate.describe();
        let diagnostic = match predicate {
            Predicate::Course { .. } => Diagnostic::new(
                DiagnosticKind::Prerequisite,
                candidate.code.clone(),
                format!("Missing prerequisite: {description}"),
                "You must complete the required courses in an earlier term.",
            ),
            Predicate::Level { level, .. } => Diagnostic::new(
                DiagnosticKind::Level,
                candidate.code.clone(),
                format!("Level requirement: {description}"),
                format!(
                    "This course requires {level} or higher. You need faculty override to take it in {}.",
                    term_label(term_index)
                ),
            ),
            Predicate::Corequisite { .. } => Diagnostic::new(
                DiagnosticKind::Corequisite,
                candidate.code.clone(),
                format!("Corequisite: {description}"),
                "This course should be taken in the same term or after its corequisites.",
            ),
            Predicate::Antirequisite { .. } => continue,
        };
        out.push(diagnostic);
    }
}

fn check_antirequisites(
    plan: &Plan,
    candidate: &Course,
    predicates: &[Predicate],
    out: &mut Vec<Diagnostic>,
) {
    let in_plan: HashSet<CourseCode> = plan.all_codes();

    for predicate in predicates {
        let Predicate::Antirequisite { courses, .. } = predicate else {
            continue;
        };
        for conflict in courses {
            // A course never conflicts with its own placements.
            if *conflict == candidate.code || !in_plan.contains(conflict) {
                continue;
            }
            out.push(Diagnostic::new(
                DiagnosticKind::Antirequisite,
                candidate.code.clone(),
                format!("Cannot take with {conflict}"),
                format!(
                    "{} and {conflict} are antirequisites and cannot both be in your plan.",
                    candidate.code
                ),
            ));
        }
    }
}
