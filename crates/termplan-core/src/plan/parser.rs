//! Plan file parser with validation.
//!
//! Parses a `plan.toml` string into a [`Plan`] and validates:
//! - Catalog codes are well-formed and unique.
//! - Term labels are one of `1A` through `4B`, each listed at most once.
//! - Term placements reference catalog courses.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::model::{Course, CourseId, Plan};
use super::toml_format::PlanToml;
use crate::requisite::CourseCode;
use crate::term::{TERM_COUNT, TermLevel};

/// Errors that can occur while loading a plan file.
#[derive(Debug, Error)]
pub enum PlanFileError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid course code {0:?}")]
    InvalidCourseCode(String),

    #[error("duplicate catalog course: {0}")]
    DuplicateCourse(CourseCode),

    #[error("invalid term label {0:?} (expected 1A through 4B)")]
    InvalidTermLabel(String),

    #[error("term {0} is listed more than once")]
    DuplicateTerm(String),

    #[error("term {term} places {code:?}, which is not in [[courses]]")]
    UnknownCourse { term: String, code: String },
}

/// Catalog courses of a plan file, keyed by normalized code.
pub type Catalog = HashMap<CourseCode, Course>;

/// Parse and validate a `plan.toml` string.
///
/// Returns a [`Plan`] with courses placed in file order, or a descriptive
/// error.
pub fn load_plan_toml(content: &str) -> Result<Plan, PlanFileError> {
    load_plan_with_catalog(content).map(|(plan, _)| plan)
}

/// Like [`load_plan_toml`], but also returns the `[[courses]]` catalog so
/// callers can look up courses that are not placed yet.
pub fn load_plan_with_catalog(content: &str) -> Result<(Plan, Catalog), PlanFileError> {
    let file: PlanToml = toml::from_str(content)?;
    let catalog = build_catalog(&file)?;
    let plan = place_terms(&file, &catalog)?;
    Ok((plan, catalog))
}

fn place_terms(file: &PlanToml, catalog: &Catalog) -> Result<Plan, PlanFileError> {
    let mut plan = Plan::new(file.plan.name.clone());
    let mut seen_terms = HashSet::new();

    for term in &file.terms {
        let index = term_index(&term.label)?;
        if !seen_terms.insert(index) {
            return Err(PlanFileError::DuplicateTerm(term.label.clone()));
        }
        for raw_code in &term.courses {
            let course = CourseCode::parse(raw_code)
                .and_then(|code| catalog.get(&code))
                .ok_or_else(|| PlanFileError::UnknownCourse {
                    term: term.label.clone(),
                    code: raw_code.clone(),
                })?;
            plan.place(index, course.clone())
                .map_err(|_| PlanFileError::InvalidTermLabel(term.label.clone()))?;
        }
    }

    tracing::debug!(
        plan = %plan.name,
        catalog = catalog.len(),
        placements = plan.course_count(),
        "loaded plan file"
    );
    Ok(plan)
}

fn build_catalog(file: &PlanToml) -> Result<Catalog, PlanFileError> {
    let mut catalog = HashMap::new();
    for entry in &file.courses {
        let code = CourseCode::parse(&entry.code)
            .ok_or_else(|| PlanFileError::InvalidCourseCode(entry.code.clone()))?;
        if catalog.contains_key(&code) {
            return Err(PlanFileError::DuplicateCourse(code));
        }

        let mut course = Course::new(code.clone());
        if let Some(id) = entry.id {
            course = course.id(CourseId(id));
        }
        if let Some(title) = &entry.title {
            course = course.title(title.clone());
        }
        if let Some(text) = &entry.requisites {
            course = course.requisites(text.clone());
        }
        if let Some(flag) = entry.has_requirements {
            course = course.has_requirements(flag);
        }
        if let Some(units) = entry.units {
            course = course.units(units);
        }
        catalog.insert(code, course);
    }
    Ok(catalog)
}

fn term_index(label: &str) -> Result<usize, PlanFileError> {
    let level: TermLevel = label
        .parse()
        .map_err(|_| PlanFileError::InvalidTermLabel(label.to_owned()))?;
    let index = level.ordinal() as usize;
    if index >= TERM_COUNT {
        return Err(PlanFileError::InvalidTermLabel(label.to_owned()));
    }
    Ok(index)
}
