use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Limits applied by the plan validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// A term holding more than this many courses gets an overload warning.
    pub max_courses_per_term: usize,
}

/// Errors raised when a configured threshold is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} env var is not a whole number: {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("max_courses_per_term must be at least 1")]
    ZeroThreshold,
}

impl ValidatorConfig {
    /// Standard full-time load is 5-6 courses; 7 and up is an overload.
    pub const DEFAULT_MAX_COURSES_PER_TERM: usize = 6;

    /// Environment variable consulted by [`ValidatorConfig::from_env`].
    pub const MAX_COURSES_ENV: &str = "TERMPLAN_MAX_COURSES_PER_TERM";

    /// Read the threshold from `TERMPLAN_MAX_COURSES_PER_TERM`.
    ///
    /// Returns `Ok(None)` when the variable is unset, and an error when it
    /// is set to something other than a positive whole number.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(raw) = env::var(Self::MAX_COURSES_ENV) else {
            return Ok(None);
        };
        let n = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
            var: Self::MAX_COURSES_ENV,
            value: raw.clone(),
        })?;
        Self::try_new(n).map(Some)
    }

    /// Build a config with an explicit threshold, rejecting 0.
    pub fn try_new(max_courses_per_term: usize) -> Result<Self, ConfigError> {
        if max_courses_per_term == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(Self::new(max_courses_per_term))
    }

    /// Build a config with an explicit threshold (useful for tests).
    pub fn new(max_courses_per_term: usize) -> Self {
        Self {
            max_courses_per_term,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_COURSES_PER_TERM)
    }
}
