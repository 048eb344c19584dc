//! Check command implementation.

use anyhow::Result;
use std::path::Path;
use tsx_tidy_checks::configured_checks;
use tsx_tidy_core::{CheckBox, Driver};

use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    checks_filter: Option<String>,
    exclude: Vec<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let project_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    };
    let config = super::load_config(project_dir, config_path)?;

    let mut checks = configured_checks(&config);
    if let Some(filter) = checks_filter {
        let wanted: Vec<&str> = filter.split(',').map(str::trim).collect();
        checks = filter_checks(checks, &wanted);
    }
    let check_count = checks.len();

    let mut exclude_patterns = config.driver.exclude.clone();
    exclude_patterns.extend(exclude);
    let respect_gitignore = config.driver.respect_gitignore;

    let driver = Driver::builder()
        .with_checks(checks)
        .with_config(config)
        .build();

    let files = super::discover(path, &exclude_patterns, respect_gitignore)?;
    tracing::info!("Checking {} file(s) with {} check(s)", files.len(), check_count);

    let report = driver.run_files(&files, false);
    super::output::print(&report, format)?;

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

/// Keeps only the checks whose name or code is in `wanted`.
fn filter_checks(mut checks: Vec<CheckBox>, wanted: &[&str]) -> Vec<CheckBox> {
    checks.retain(|c| wanted.contains(&c.name()) || wanted.contains(&c.code()));
    for name in wanted {
        if !checks.iter().any(|c| c.name() == *name || c.code() == *name) {
            tracing::warn!("Unknown check: {}", name);
        }
    }
    checks
}
