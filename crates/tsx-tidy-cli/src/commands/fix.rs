//! Fix command implementation.

use anyhow::Result;
use std::path::Path;
use tsx_tidy_checks::configured_checks;
use tsx_tidy_core::{Driver, Finding, Location, RunReport, Severity};

use crate::OutputFormat;

/// Runs the fix command.
pub fn run(path: &Path, format: OutputFormat, dry_run: bool, config_path: Option<&Path>) -> Result<()> {
    let project_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    };
    let config = super::load_config(project_dir, config_path)?;

    let exclude_patterns = config.driver.exclude.clone();
    let respect_gitignore = config.driver.respect_gitignore;

    let driver = Driver::builder()
        .with_checks(configured_checks(&config))
        .with_config(config)
        .build();

    let files = super::discover(path, &exclude_patterns, respect_gitignore)?;
    tracing::info!("Fixing {} file(s){}", files.len(), if dry_run { " (dry run)" } else { "" });

    let report = if dry_run {
        dry_run_report(&driver, &files)
    } else {
        driver.run_files(&files, true)
    };

    super::output::print(&report, format)?;

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

/// Runs the fix loop in memory, reporting would-be changes without writes.
fn dry_run_report(driver: &Driver, files: &[std::path::PathBuf]) -> RunReport {
    let mut report = RunReport::new();
    for file in files {
        report.files_checked += 1;
        let text = match std::fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                report.findings.push(file_error(file, &e.to_string()));
                continue;
            }
        };
        match driver.run_source(file, &text, true) {
            Ok(outcome) => {
                if outcome.changed(&text) {
                    println!("would fix: {}", file.display());
                    report.files_fixed += 1;
                }
                report.findings.extend(outcome.findings);
            }
            Err(e) => report.findings.push(file_error(file, &e.to_string())),
        }
    }
    report
}

fn file_error(path: &Path, message: &str) -> Finding {
    Finding::new(
        "TT000",
        "driver",
        Severity::Error,
        Location::new(path.to_path_buf(), 1, 1),
        message,
    )
}
