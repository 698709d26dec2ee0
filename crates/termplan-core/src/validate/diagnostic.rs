use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::requisite::CourseCode;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How strongly a diagnostic should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks committing the plan change.
    Error,
    /// Advisory; the student may proceed.
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        f.write_str(s)
    }
}

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(SeverityParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Severity`] string.
#[derive(Debug, Clone)]
pub struct SeverityParseError(pub String);

impl fmt::Display for SeverityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid severity: {:?}", self.0)
    }
}

impl std::error::Error for SeverityParseError {}

// ---------------------------------------------------------------------------

/// Which rule a diagnostic reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Prerequisite,
    Antirequisite,
    Corequisite,
    Level,
    Duplicate,
    Overload,
}

impl DiagnosticKind {
    /// Severity this kind of finding is always reported with.
    pub fn severity(self) -> Severity {
        match self {
            Self::Prerequisite | Self::Antirequisite => Severity::Error,
            Self::Corequisite | Self::Level | Self::Duplicate | Self::Overload => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Prerequisite => "prerequisite",
            Self::Antirequisite => "antirequisite",
            Self::Corequisite => "corequisite",
            Self::Level => "level",
            Self::Duplicate => "duplicate",
            Self::Overload => "overload",
        };
        f.write_str(s)
    }
}

impl FromStr for DiagnosticKind {
    type Err = DiagnosticKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prerequisite" => Ok(Self::Prerequisite),
            "antirequisite" => Ok(Self::Antirequisite),
            "corequisite" => Ok(Self::Corequisite),
            "level" => Ok(Self::Level),
            "duplicate" => Ok(Self::Duplicate),
            "overload" => Ok(Self::Overload),
            other => Err(DiagnosticKindParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`DiagnosticKind`] string.
#[derive(Debug, Clone)]
pub struct DiagnosticKindParseError(pub String);

impl fmt::Display for DiagnosticKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid diagnostic kind: {:?}", self.0)
    }
}

impl std::error::Error for DiagnosticKindParseError {}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// The course the finding is about.
    pub course_code: CourseCode,
    /// One-line summary, always non-empty.
    pub message: String,
    /// Longer explanation, always non-empty.
    pub details: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic whose severity follows its kind.
    pub fn new(
        kind: DiagnosticKind,
        course_code: CourseCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            course_code,
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.kind, self.course_code, self.message
        )
    }
}

/// Drop diagnostics whose `(course_code, kind, message)` was already seen,
/// keeping the first occurrence and the original order.
pub fn dedup_diagnostics(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen: HashSet<(CourseCode, DiagnosticKind, String)> = HashSet::new();
    diagnostics
        .into_iter()
        .filter(|d| seen.insert((d.course_code.clone(), d.kind, d.message.clone())))
        .collect()
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Outcome of validating a plan or a single addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` when there are no errors. Warnings never affect validity.
    pub is_valid: bool,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Split diagnostics by severity. `Info` findings are kept with the
    /// warnings since neither blocks.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics
            .into_iter()
            .partition(|d| d.severity == Severity::Error);
        Self {
            is_valid: errors.is_empty(),
            warnings,
            errors,
        }
    }

    /// All diagnostics, errors first.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Diagnostics of one kind, errors first.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics().filter(move |d| d.kind == kind)
    }

    /// Collapse repeated findings in both lists.
    pub fn dedup(self) -> Self {
        let errors = dedup_diagnostics(self.errors);
        let warnings = dedup_diagnostics(self.warnings);
        Self {
            is_valid: errors.is_empty(),
            warnings,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(kind: DiagnosticKind, code: &str, message: &str) -> Diagnostic {
        Diagnostic::new(
            kind,
            CourseCode::parse(code).unwrap(),
            message,
            "details",
        )
    }

    #[test]
    fn severity_follows_kind() {
        assert_eq!(DiagnosticKind::Prerequisite.severity(), Severity::Error);
        assert_eq!(DiagnosticKind::Antirequisite.severity(), Severity::Error);
        for kind in [
            DiagnosticKind::Corequisite,
            DiagnosticKind::Level,
            DiagnosticKind::Duplicate,
            DiagnosticKind::Overload,
        ] {
            assert_eq!(kind.severity(), Severity::Warning, "{kind}");
        }
    }

    #[test]
    fn kind_string_roundtrip() {
        for s in [
            "prerequisite",
            "antirequisite",
            "corequisite",
            "level",
            "duplicate",
            "overload",
        ] {
            let kind: DiagnosticKind = s.parse().expect("valid kind");
            assert_eq!(kind.to_string(), s);
        }
        assert!("bogus".parse::<DiagnosticKind>().is_err());
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn dedup_uses_code_kind_and_message() {
        let list = vec![
            diag(DiagnosticKind::Prerequisite, "ECE 250", "Missing prerequisite: ECE 105"),
            diag(DiagnosticKind::Prerequisite, "ECE 250", "Missing prerequisite: ECE 105"),
            diag(DiagnosticKind::Prerequisite, "ECE 251", "Missing prerequisite: ECE 105"),
            diag(DiagnosticKind::Corequisite, "ECE 250", "Missing prerequisite: ECE 105"),
        ];
        assert_eq!(dedup_diagnostics(list).len(), 3);
    }

    #[test]
    fn result_splits_by_severity() {
        let result = ValidationResult::from_diagnostics(vec![
            diag(DiagnosticKind::Overload, "ECE 250", "Term overload: 7 courses"),
            diag(DiagnosticKind::Antirequisite, "ECE 250", "Cannot take with CS 241"),
        ]);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        let kinds: Vec<DiagnosticKind> = result.diagnostics().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::Antirequisite, DiagnosticKind::Overload]
        );
    }

    #[test]
    fn warnings_alone_are_valid() {
        let result = ValidationResult::from_diagnostics(vec![diag(
            DiagnosticKind::Level,
            "ECE 455",
            "Level requirement: Level 4A or higher",
        )]);
        assert!(result.is_valid);
    }

    #[test]
    fn display_is_one_line() {
        let d = diag(DiagnosticKind::Duplicate, "MATH 117", "Course already exists in 1B");
        assert_eq!(
            d.to_string(),
            "warning [duplicate] MATH 117: Course already exists in 1B"
        );
    }
}
