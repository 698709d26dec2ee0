//! Academic term labels (`1A`, `1B`, `2A`, ...) and their ordinal encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of terms in a plan (1A through 4B).
pub const TERM_COUNT: usize = 8;

/// Labels of the fixed curriculum terms, in program order.
pub const TERM_LABELS: [&str; TERM_COUNT] = ["1A", "1B", "2A", "2B", "3A", "3B", "4A", "4B"];

/// Position of a student in the program, compared by ordinal only.
///
/// `ordinal = year * 2 + (0 for A, 1 for B) - 2`, so `1A` is 0, `1B` is 1,
/// `2A` is 2 and so on. The ordinal doubles as a plan's term index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermLevel(u32);

impl TermLevel {
    /// Build a level from its ordinal (which is also the term index).
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// The ordinal used for comparisons.
    pub fn ordinal(self) -> u32 {
        self.0
    }

    /// Year of study, starting at 1.
    pub fn year(self) -> u32 {
        self.0 / 2 + 1
    }

    /// `'A'` for the first half of a year, `'B'` for the second.
    pub fn half(self) -> char {
        if self.0 % 2 == 0 { 'A' } else { 'B' }
    }

    /// Render as a label such as `"3A"`.
    pub fn label(self) -> String {
        format!("{}{}", self.year(), self.half())
    }
}

/// Label for an arbitrary term index; indices past 4B keep counting (`5A`).
pub fn term_label(index: usize) -> String {
    TermLevel::from_index(index).label()
}

impl fmt::Display for TermLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year(), self.half())
    }
}

/// Error returned when parsing an invalid term label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid term label: {0:?} (expected e.g. 1A, 2B, 3A)")]
pub struct TermLevelParseError(pub String);

impl FromStr for TermLevel {
    type Err = TermLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TermLevelParseError(s.to_owned());
        let trimmed = s.trim();
        let half = trimmed.chars().last().ok_or_else(err)?;
        let digits = &trimmed[..trimmed.len() - half.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let year: u32 = digits.parse().map_err(|_| err())?;
        if year == 0 {
            return Err(err());
        }
        let offset = match half.to_ascii_uppercase() {
            'A' => 0,
            'B' => 1,
            _ => return Err(err()),
        };
        year.checked_mul(2)
            .and_then(|n| n.checked_add(offset))
            .map(|n| Self(n - 2))
            .ok_or_else(err)
    }
}

impl Serialize for TermLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TermLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
