//! Text and JSON rendering of validation results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use termplan_core::{Diagnostic, ValidationResult};

/// One validated plan, as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub file: String,
    pub plan: String,
    pub checked_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl PlanReport {
    pub fn new(file: impl Into<String>, plan: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            file: file.into(),
            plan: plan.into(),
            checked_at: Utc::now(),
            result,
        }
    }
}

/// Render a result as a human-readable block.
pub fn render_result(result: &ValidationResult) -> String {
    let mut out = String::new();
    render_section(&mut out, "Errors", &result.errors);
    render_section(&mut out, "Warnings", &result.warnings);
    let verdict = if result.is_valid { "valid" } else { "INVALID" };
    out.push_str(&format!(
        "Result: {verdict} ({} errors, {} warnings)\n",
        result.errors.len(),
        result.warnings.len()
    ));
    out
}

fn render_section(out: &mut String, title: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    out.push_str(&format!("{title} ({}):\n", diagnostics.len()));
    out.push_str(&format!("  {:<12} {:<14} MESSAGE\n", "COURSE", "KIND"));
    out.push_str(&format!("  {}\n", "-".repeat(70)));
    for d in diagnostics {
        out.push_str(&format!(
            "  {:<12} {:<14} {}\n",
            d.course_code.as_str(),
            d.kind.to_string(),
            d.message
        ));
        if let Some(details) = &d.details {
            out.push_str(&format!("  {:<12} {:<14} {details}\n", "", ""));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use termplan_core::DiagnosticKind;
    use termplan_test_utils::code;

    #[test]
    fn valid_result_renders_summary_only() {
        let result = ValidationResult::from_diagnostics(Vec::new());
        assert_eq!(render_result(&result), "Result: valid (0 errors, 0 warnings)\n");
    }

    #[test]
    fn errors_are_listed_with_details() {
        let result = ValidationResult::from_diagnostics(vec![Diagnostic::new(
            DiagnosticKind::Antirequisite,
            code("ECE 250"),
            "Cannot take with CS 241",
            "ECE 250 and CS 241 are antirequisites and cannot both be in your plan.",
        )]);
        let text = render_result(&result);
        assert!(text.starts_with("Errors (1):"), "got: {text}");
        assert!(text.contains("ECE 250      antirequisite  Cannot take with CS 241"));
        assert!(text.contains("cannot both be in your plan."));
        assert!(text.ends_with("Result: INVALID (1 errors, 0 warnings)\n"));
    }

    #[test]
    fn warnings_follow_errors() {
        let result = ValidationResult::from_diagnostics(vec![
            Diagnostic::new(
                DiagnosticKind::Overload,
                code("ECE 190"),
                "Term overload: 7 courses",
                "This term has more than 6 courses.",
            ),
            Diagnostic::new(
                DiagnosticKind::Prerequisite,
                code("ECE 350"),
                "Missing prerequisite: ECE 250",
                "You must complete the required courses in an earlier term.",
            ),
        ]);
        let text = render_result(&result);
        let errors_at = text.find("Errors (1):").expect("errors section");
        let warnings_at = text.find("Warnings (1):").expect("warnings section");
        assert!(errors_at < warnings_at, "got:\n{text}");
        assert_eq!(text.lines().count(), 13, "got:\n{text}");
    }

    #[test]
    fn json_report_flattens_result() {
        let report = PlanReport::new(
            "plan.toml",
            "CE",
            ValidationResult::from_diagnostics(Vec::new()),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "plan.toml");
        assert_eq!(json["is_valid"], true);
        assert!(json["errors"].as_array().unwrap().is_empty());
        assert!(json["checked_at"].is_string());
    }
}
