//! TOML format types for plan files.
//!
//! These types map directly to the `plan.toml` on-disk format and are
//! deserialized via `serde` + the `toml` crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level structure of a `plan.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanToml {
    /// Plan metadata.
    pub plan: PlanMeta,
    /// Catalog excerpt: every course the plan places.
    #[serde(default)]
    pub courses: Vec<CourseToml>,
    /// Term placements. Terms that are not listed stay empty.
    #[serde(default)]
    pub terms: Vec<TermToml>,
}

/// Plan-level metadata in `[plan]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMeta {
    /// Human-readable plan name.
    pub name: String,
    /// Program the plan is written for (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

/// A single `[[courses]]` catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseToml {
    /// Course code, e.g. "ECE 250". Normalized on load.
    pub code: String,
    /// Catalog id. A random id is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw requisite text as published by the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requisites: Option<String>,
    /// Overrides the "has requisites" catalog flag. Defaults to whether
    /// `requisites` is non-blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_requirements: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<f32>,
}

/// A single `[[terms]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TermToml {
    /// Term label: "1A" through "4B".
    pub label: String,
    /// Codes of catalog courses placed in this term, in display order.
    #[serde(default)]
    pub courses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_plan() {
        let toml_str = r#"
[plan]
name = "Empty plan"
"#;
        let plan: PlanToml = toml::from_str(toml_str).expect("should parse");
        assert_eq!(plan.plan.name, "Empty plan");
        assert!(plan.plan.program.is_none());
        assert!(plan.courses.is_empty());
        assert!(plan.terms.is_empty());
    }

    #[test]
    fn deserialize_full_plan() {
        let toml_str = r#"
[plan]
name = "CE 2026"
program = "Computer Engineering"

[[courses]]
code = "ECE 105"
title = "Classical Mechanics"
units = 0.5

[[courses]]
code = "ECE 250"
id = "7f1c4a8e-2b1d-4c7a-9a53-1f0e6c3d2b10"
requisites = "Prereq: ECE 105; Antireq: CS 241"

[[terms]]
label = "1A"
courses = ["ECE 105"]

[[terms]]
label = "2A"
courses = ["ECE 250"]
"#;
        let plan: PlanToml = toml::from_str(toml_str).expect("should parse");
        assert_eq!(plan.plan.program.as_deref(), Some("Computer Engineering"));
        assert_eq!(plan.courses.len(), 2);
        assert_eq!(plan.courses[0].units, Some(0.5));
        assert!(plan.courses[0].requisites.is_none());
        assert!(plan.courses[1].id.is_some());
        assert_eq!(plan.terms[1].label, "2A");
        assert_eq!(plan.terms[1].courses, vec!["ECE 250"]);
    }

    #[test]
    fn roundtrip_serialize() {
        let plan = PlanToml {
            plan: PlanMeta {
                name: "Roundtrip".into(),
                program: None,
            },
            courses: vec![CourseToml {
                code: "CS 241".into(),
                id: None,
                title: None,
                requisites: Some("Prereq: CS 136".into()),
                has_requirements: None,
                units: None,
            }],
            terms: vec![TermToml {
                label: "2B".into(),
                courses: vec!["CS 241".into()],
            }],
        };
        let serialized = toml::to_string_pretty(&plan).expect("should serialize");
        let back: PlanToml = toml::from_str(&serialized).expect("should parse back");
        assert_eq!(plan, back);
    }
}
