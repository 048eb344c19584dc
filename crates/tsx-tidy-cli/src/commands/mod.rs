//! CLI command implementations.

pub mod check;
pub mod fix;
pub mod init;
pub mod list_checks;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tsx_tidy_core::Config;

use crate::config_resolver::{self, ConfigSource};

/// Source file extensions the driver understands.
const SOURCE_EXTENSIONS: &[&str] = &["tsx", "jsx", "ts"];

/// Loads the effective configuration for a run.
pub(crate) fn load_config(project_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let source = config_resolver::resolve(project_dir, explicit);
    match &source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Non-Default variants always carry a path.
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Walks `root` and collects checkable source files.
///
/// `.gitignore` handling and extra exclude patterns come from config and
/// the command line. A `root` that is itself a file is returned as-is.
pub(crate) fn discover(root: &Path, exclude: &[String], respect_gitignore: bool) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut overrides = OverrideBuilder::new(root);
    for pattern in exclude {
        // A leading `!` in override syntax means "exclude".
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("Invalid exclude pattern: {pattern}"))?;
    }
    let overrides = overrides.build().context("Failed to build exclude set")?;

    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .overrides(overrides)
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
        })
        .collect();
    files.sort();
    Ok(files)
}
