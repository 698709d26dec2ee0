//! `termplan validate` command: validate one or more plan files.
//!
//! Each file is loaded and validated on its own tokio task; reports are
//! printed in the order the files were given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::task::JoinSet;
use tracing::info;

use termplan_core::plan::load_plan_toml;
use termplan_core::{Validator, ValidatorConfig};

use crate::report::{PlanReport, render_result};

/// Run the validate command. Returns `true` when every plan is valid.
pub async fn run_validate(files: &[PathBuf], config: ValidatorConfig, json: bool) -> Result<bool> {
    let reports = validate_files(files, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("Plan: {} ({})", report.plan, report.file);
            print!("{}", render_result(&report.result));
        }
    }

    Ok(reports.iter().all(|r| r.result.is_valid))
}

/// Validate every file concurrently, returning reports in input order.
pub async fn validate_files(files: &[PathBuf], config: ValidatorConfig) -> Result<Vec<PlanReport>> {
    let validator = Validator::new(config);
    let mut set = JoinSet::new();
    for (i, file) in files.iter().cloned().enumerate() {
        set.spawn(async move { (i, validate_file(&file, validator).await) });
    }

    let mut slots: Vec<Option<PlanReport>> = files.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        let (i, report) = joined.context("validation task failed")?;
        slots[i] = Some(report?);
    }

    Ok(slots.into_iter().flatten().collect())
}

async fn validate_file(path: &Path, validator: Validator) -> Result<PlanReport> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read plan file {}", path.display()))?;
    let plan = load_plan_toml(&content)
        .with_context(|| format!("failed to load plan {}", path.display()))?;

    let result = validator.validate_plan(&plan);
    info!(
        file = %path.display(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated plan"
    );

    Ok(PlanReport::new(path.display().to_string(), plan.name, result))
}
