//! `termplan check` command: validate adding one catalog course to a term.

use std::path::Path;

use anyhow::{Context, Result, bail};

use termplan_core::plan::load_plan_with_catalog;
use termplan_core::term::TERM_COUNT;
use termplan_core::{CourseCode, TermLevel, Validator, ValidatorConfig};

use crate::report::{PlanReport, render_result};

/// Run the check command. Returns `true` when the addition has no errors.
pub async fn run_check(
    file: &Path,
    term: &str,
    course: &str,
    config: ValidatorConfig,
    json: bool,
) -> Result<bool> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read plan file {}", file.display()))?;
    let report = check_addition(&content, term, course, Validator::new(config))
        .with_context(|| format!("cannot check {course} in {}", file.display()))?;
    let report = PlanReport {
        file: file.display().to_string(),
        ..report
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Plan: {} ({})", report.plan, report.file);
        println!("Adding {course} to {term}:");
        print!("{}", render_result(&report.result));
    }

    Ok(report.result.is_valid)
}

/// Validate placing catalog course `course` into term `term` of the plan in
/// `content`. The returned report has an empty `file`.
pub fn check_addition(
    content: &str,
    term: &str,
    course: &str,
    validator: Validator,
) -> Result<PlanReport> {
    let (plan, catalog) = load_plan_with_catalog(content).context("failed to load plan")?;

    let level: TermLevel = term.parse()?;
    let term_index = level.ordinal() as usize;
    if term_index >= TERM_COUNT {
        bail!("term {level} is outside the plan (1A through 4B)");
    }

    let code = CourseCode::parse(course)
        .with_context(|| format!("invalid course code: {course:?}"))?;
    let Some(candidate) = catalog.get(&code) else {
        bail!("course {code} is not listed in the plan's [[courses]]");
    };

    let result = validator.validate_addition(&plan, term_index, candidate);
    Ok(PlanReport::new(String::new(), plan.name, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use termplan_core::DiagnosticKind;
    use termplan_test_utils::SAMPLE_PLAN_TOML;

    const PLAN: &str = r#"
[plan]
name = "check"

[[courses]]
code = "ECE 105"

[[courses]]
code = "ECE 205"
requisites = "Prereq: ECE 105"

[[terms]]
label = "1B"
courses = ["ECE 105"]
"#;

    #[test]
    fn unplaced_course_can_be_checked() {
        let report = check_addition(PLAN, "2A", "ece205", Validator::default()).unwrap();
        assert_eq!(report.plan, "check");
        assert!(report.result.is_valid, "got: {:?}", report.result);
    }

    #[test]
    fn addition_before_prerequisite_is_an_error() {
        let report = check_addition(PLAN, "1A", "ECE 205", Validator::default()).unwrap();
        assert!(!report.result.is_valid);
        assert_eq!(
            report.result.of_kind(DiagnosticKind::Prerequisite).count(),
            1
        );
    }

    #[test]
    fn antirequisite_conflict_is_found_for_new_placement() {
        let report =
            check_addition(SAMPLE_PLAN_TOML, "3A", "ECE 250", Validator::default()).unwrap();
        assert_eq!(
            report.result.of_kind(DiagnosticKind::Antirequisite).count(),
            1
        );
    }

    #[test]
    fn unknown_course_is_rejected() {
        let err = check_addition(PLAN, "2A", "CS 135", Validator::default()).unwrap_err();
        assert!(
            err.to_string().contains("not listed"),
            "expected missing course, got: {err}"
        );
    }

    #[test]
    fn term_past_4b_is_rejected() {
        let err = check_addition(PLAN, "5A", "ECE 205", Validator::default()).unwrap_err();
        assert!(
            err.to_string().contains("outside the plan"),
            "expected range error, got: {err}"
        );
        assert!(check_addition(PLAN, "2C", "ECE 205", Validator::default()).is_err());
    }
}
