//! Course codes: normalization and extraction from catalog text.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A normalized `"SUBJECT NUMBER"` course code such as `"ECE 250"`.
///
/// Only constructible through [`CourseCode::parse`] or extraction, so every
/// value is upper-cased with exactly one space between subject and number.
/// Codes compare by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    /// Normalize a single course code (`"ece250"`, `"Ece  250"`, ...).
    ///
    /// A slash alternate (`"ECE 250/251"`) is accepted but only the first
    /// number is kept. Returns `None` when the input is not a course code.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = single_code_re().captures(s)?;
        Some(Self::from_parts(&caps[1], &caps[2]))
    }

    fn from_parts(subject: &str, number: &str) -> Self {
        Self(format!(
            "{} {}",
            subject.to_ascii_uppercase(),
            number.to_ascii_uppercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The subject part, e.g. `"ECE"`.
    pub fn subject(&self) -> &str {
        self.0.split_once(' ').map_or(self.0.as_str(), |(s, _)| s)
    }

    /// The catalog number part, e.g. `"250"` or `"457A"`.
    pub fn number(&self) -> &str {
        self.0.split_once(' ').map_or("", |(_, n)| n)
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CourseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CourseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid course code: {s:?}")))
    }
}

/// Words that can sit directly in front of a three-digit number in catalog
/// prose without being a subject ("MATH 117 or 119", "two 400-level").
const NON_SUBJECT_WORDS: &[&str] = &[
    "ABOVE", "ADDITIONAL", "ALL", "AND", "ANTIREQ", "ANY", "AT", "BELOW", "COMPLETE", "COMPLETED",
    "COREQ", "COURSE", "COURSES", "EIGHT", "EITHER", "FIVE", "FOUR", "FROM", "GRADE", "IN",
    "LEAST", "LEVEL", "MAXIMUM", "MIN", "MINIMUM", "MORE", "NINE", "NOR", "NOT", "OF", "ONE",
    "ONLY", "OR", "OTHER", "OVER", "PERCENT", "PLUS", "PREREQ", "SEVEN", "SIX", "STUDENTS", "TAKE",
    "TAKEN", "TEN", "TERM", "THAN", "THE", "THREE", "TO", "TOTAL", "TWO", "UNIT", "UNITS", "WITH",
    "YEAR",
];

// Patterns are ASCII-only (`-u`): subjects are Latin letters and numbers are
// `0-9`, whatever other scripts appear in the text.
fn code_scan_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i-u)\b([a-z]{2,10})\s*([0-9]{3}[a-z]?)(?:/[0-9]{3}[a-z]?)?\b(-)?")
            .expect("course code scan regex must compile")
    })
}

fn single_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i-u)^\s*([a-z]{2,10})\s*([0-9]{3}[a-z]?)(?:/[0-9]{3}[a-z]?)?\s*$")
            .expect("course code regex must compile")
    })
}

/// Extract every course code mentioned in `text`, deduplicated in
/// first-seen order.
///
/// A number followed by `-` is a range or a level ("300-level"), not a
/// catalog number, and is skipped.
pub fn extract_course_codes(text: &str) -> Vec<CourseCode> {
    let mut codes: Vec<CourseCode> = Vec::new();
    for caps in code_scan_re().captures_iter(text) {
        if caps.get(3).is_some() {
            continue;
        }
        let subject = &caps[1];
        if NON_SUBJECT_WORDS
            .iter()
            .any(|w| w.eq_ignore_ascii_case(subject))
        {
            continue;
        }
        let code = CourseCode::from_parts(subject, &caps[2]);
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}
