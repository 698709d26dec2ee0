//! Configuration file management for termplan.
//!
//! Provides a TOML-based config file at `~/.config/termplan/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use termplan_core::ValidatorConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub validation: ValidationSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationSection {
    /// Courses allowed in one term before an overload warning.
    pub max_courses_per_term: usize,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the termplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/termplan` or
/// `~/.config/termplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("termplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("termplan")
}

/// Return the path to the termplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct TermplanConfig {
    pub validator: ValidatorConfig,
}

impl TermplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// Overload threshold: `cli_max_courses` > `TERMPLAN_MAX_COURSES_PER_TERM`
    /// env > `config_file.validation.max_courses_per_term` >
    /// `ValidatorConfig::DEFAULT_MAX_COURSES_PER_TERM`.
    pub fn resolve(cli_max_courses: Option<usize>) -> Result<Self> {
        let file_config = load_config().ok();

        let validator = if let Some(n) = cli_max_courses {
            ValidatorConfig::try_new(n).context("invalid --max-courses-per-term")?
        } else if let Some(cfg) = ValidatorConfig::from_env()? {
            cfg
        } else if let Some(ref cfg) = file_config {
            ValidatorConfig::try_new(cfg.validation.max_courses_per_term)
                .with_context(|| format!("invalid config file {}", config_path().display()))?
        } else {
            ValidatorConfig::default()
        };

        Ok(Self { validator })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
