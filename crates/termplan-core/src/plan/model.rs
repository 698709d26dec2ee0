//! In-memory plan snapshot: courses placed into the eight program terms.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::requisite::CourseCode;
use crate::term::{TERM_COUNT, term_label};

/// Stable identity of a catalog course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub Uuid);

impl CourseId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A catalog course as seen by the validator.
///
/// Use [`Course::new`] for the required code, then chain optional setters
/// (builder-style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub code: CourseCode,
    pub title: Option<String>,
    /// Raw requisite text from the catalog.
    pub requisites: Option<String>,
    /// Whether the catalog flags this course as having requisites. The
    /// validator skips requisite checks when this is `false`.
    pub has_requirements: bool,
    pub units: Option<f32>,
}

impl Course {
    /// Create a course with a fresh id and no requisites.
    pub fn new(code: CourseCode) -> Self {
        Self {
            id: CourseId::new_v4(),
            code,
            title: None,
            requisites: None,
            has_requirements: false,
            units: None,
        }
    }

    /// Set the id.
    pub fn id(mut self, id: CourseId) -> Self {
        self.id = id;
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the requisite text. Also sets `has_requirements` to whether the
    /// text is non-blank.
    pub fn requisites(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.has_requirements = !text.trim().is_empty();
        self.requisites = Some(text);
        self
    }

    /// Override the `has_requirements` flag.
    pub fn has_requirements(mut self, flag: bool) -> Self {
        self.has_requirements = flag;
        self
    }

    /// Set the unit weight.
    pub fn units(mut self, units: f32) -> Self {
        self.units = Some(units);
        self
    }
}

/// A course placed in a term, with its display position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourse {
    pub course: Course,
    pub position: u32,
}

/// One of the eight program terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// 0-based offset in program order; also the temporal axis.
    pub index: usize,
    pub label: String,
    pub courses: Vec<PlannedCourse>,
}

impl Term {
    /// An empty term at `index`, labelled `1A`, `1B`, ...
    pub fn new(index: usize) -> Self {
        Self {
            index,
            label: term_label(index),
            courses: Vec::new(),
        }
    }

    pub fn codes(&self) -> impl Iterator<Item = &CourseCode> {
        self.courses.iter().map(|pc| &pc.course.code)
    }
}

/// Errors raised when building or editing a [`Plan`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("a plan must have exactly {expected} terms, got {found}")]
    WrongTermCount { expected: usize, found: usize },

    #[error("term at position {position} has index {index}")]
    TermOutOfOrder { position: usize, index: usize },

    #[error("term index {0} is outside the plan")]
    TermIndexOutOfRange(usize),

    #[error("{code} is not placed in term {term}")]
    CourseNotInTerm { code: CourseCode, term: String },
}

/// An academic plan: exactly [`TERM_COUNT`] terms in program order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub name: String,
    terms: Vec<Term>,
}

impl Plan {
    /// A plan with the eight empty terms 1A through 4B.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terms: (0..TERM_COUNT).map(Term::new).collect(),
        }
    }

    /// Build a plan from explicit terms, which must be exactly
    /// [`TERM_COUNT`] long and indexed `0..TERM_COUNT` in order.
    pub fn from_terms(name: impl Into<String>, terms: Vec<Term>) -> Result<Self, PlanError> {
        if terms.len() != TERM_COUNT {
            return Err(PlanError::WrongTermCount {
                expected: TERM_COUNT,
                found: terms.len(),
            });
        }
        for (position, term) in terms.iter().enumerate() {
            if term.index != position {
                return Err(PlanError::TermOutOfOrder {
                    position,
                    index: term.index,
                });
            }
        }
        Ok(Self {
            name: name.into(),
            terms,
        })
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    /// Append `course` to a term, after its last display position.
    pub fn place(&mut self, term_index: usize, course: Course) -> Result<(), PlanError> {
        let term = self
            .terms
            .get_mut(term_index)
            .ok_or(PlanError::TermIndexOutOfRange(term_index))?;
        let position = term
            .courses
            .iter()
            .map(|pc| pc.position + 1)
            .max()
            .unwrap_or(0);
        term.courses.push(PlannedCourse { course, position });
        Ok(())
    }

    /// Remove a placed course from a term and return it.
    pub fn remove(&mut self, term_index: usize, code: &CourseCode) -> Result<Course, PlanError> {
        let term = self
            .terms
            .get_mut(term_index)
            .ok_or(PlanError::TermIndexOutOfRange(term_index))?;
        let idx = term
            .courses
            .iter()
            .position(|pc| &pc.course.code == code)
            .ok_or_else(|| PlanError::CourseNotInTerm {
                code: code.clone(),
                term: term.label.clone(),
            })?;
        Ok(term.courses.remove(idx).course)
    }

    /// Codes of every course in a term strictly before `term_index`.
    pub fn codes_before(&self, term_index: usize) -> HashSet<CourseCode> {
        self.terms
            .iter()
            .filter(|t| t.index < term_index)
            .flat_map(Term::codes)
            .cloned()
            .collect()
    }

    /// Codes of every course anywhere in the plan.
    pub fn all_codes(&self) -> HashSet<CourseCode> {
        self.terms.iter().flat_map(Term::codes).cloned().collect()
    }

    /// Total number of placements across all terms.
    pub fn course_count(&self) -> usize {
        self.terms.iter().map(|t| t.courses.len()).sum()
    }
}
