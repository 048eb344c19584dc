//! The driver: parse, index, check, fix, and iterate to a fixpoint.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use tree_sitter::Node;
use tsx_tidy_syntax::{ParseError, ScopeIndex, SourceFile};

use crate::check::CheckBox;
use crate::collab::{ClassOrder, DefaultClassOrder, DirLister, FsDirLister};
use crate::config::Config;
use crate::context::CheckContext;
use crate::fixer;
use crate::types::{Finding, Location, RunReport, Severity};

/// Errors from a driver run.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Failed to read or write a source file.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A file failed to parse; no checking happens on a broken tree.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Result of driving one file to a fixpoint (or the iteration cap).
#[derive(Debug)]
pub struct RunOutcome {
    /// Final source text after all applied fixes.
    pub text: String,
    /// Findings from the final analysis pass, in source order.
    pub findings: Vec<Finding>,
    /// Number of parse→check passes performed.
    pub iterations: usize,
    /// True when the run converged: the final pass produced no applicable
    /// fixes. False means the iteration cap cut the run short.
    pub fixpoint: bool,
}

impl RunOutcome {
    /// True when fixing changed the source text.
    #[must_use]
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Builder for [`Driver`].
#[derive(Default)]
pub struct DriverBuilder {
    checks: Vec<CheckBox>,
    config: Config,
    dir_lister: Option<Box<dyn DirLister>>,
    class_order: Option<Box<dyn ClassOrder>>,
}

impl DriverBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check.
    #[must_use]
    pub fn with_check(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds several checks.
    #[must_use]
    pub fn with_checks(mut self, checks: impl IntoIterator<Item = CheckBox>) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the directory-listing collaborator.
    #[must_use]
    pub fn with_dir_lister(mut self, lister: Box<dyn DirLister>) -> Self {
        self.dir_lister = Some(lister);
        self
    }

    /// Replaces the class-order collaborator.
    #[must_use]
    pub fn with_class_order(mut self, order: Box<dyn ClassOrder>) -> Self {
        self.class_order = Some(order);
        self
    }

    /// Builds the driver.
    #[must_use]
    pub fn build(self) -> Driver {
        Driver {
            checks: self.checks,
            config: self.config,
            dir_lister: self.dir_lister.unwrap_or_else(|| Box::new(FsDirLister)),
            class_order: self
                .class_order
                .unwrap_or_else(|| Box::new(DefaultClassOrder::new())),
        }
    }
}

/// Orchestrates checks over files, applying fixes until nothing changes.
///
/// Each iteration re-parses the current text and rebuilds the scope index,
/// so every fix round works against fresh offsets. The per-file iteration
/// cap guards against a check whose fix keeps producing new findings.
pub struct Driver {
    checks: Vec<CheckBox>,
    config: Config,
    dir_lister: Box<dyn DirLister>,
    class_order: Box<dyn ClassOrder>,
}

impl Driver {
    /// Starts building a driver.
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Checks (and optionally fixes) one file on disk.
    ///
    /// With `fix` set, the rewritten text is written back when it differs
    /// from the original.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, written, or parsed.
    pub fn run_file(&self, path: &Path, fix: bool) -> Result<RunOutcome, DriverError> {
        let original = std::fs::read_to_string(path).map_err(|e| DriverError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let outcome = self.run_source(path, &original, fix)?;
        if fix && outcome.changed(&original) {
            std::fs::write(path, &outcome.text).map_err(|e| DriverError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(outcome)
    }

    /// Checks (and optionally fixes) in-memory source text.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Parse`] when the text has syntax errors; a
    /// broken tree is never checked or fixed.
    pub fn run_source(
        &self,
        path: &Path,
        text: &str,
        fix: bool,
    ) -> Result<RunOutcome, DriverError> {
        let max_iterations = self.config.driver.max_iterations.max(1);
        let mut current = text.to_owned();
        let mut iterations = 0;

        loop {
            iterations += 1;
            let source = SourceFile::parse(path, &current)?;
            let scopes = ScopeIndex::build(&source);
            let findings = self.collect_findings(&source, &scopes);

            if !fix {
                return Ok(RunOutcome {
                    text: current,
                    findings,
                    iterations,
                    fixpoint: true,
                });
            }

            let edits = fixer::plan_pass(&findings, &source, &scopes);
            if edits.is_empty() {
                return Ok(RunOutcome {
                    text: current,
                    findings,
                    iterations,
                    fixpoint: true,
                });
            }
            if iterations >= max_iterations {
                tracing::warn!(
                    path = %path.display(),
                    iterations,
                    "iteration cap reached before fixpoint"
                );
                // Remaining findings surface without their fix requests;
                // the cap means they are manual from here.
                let findings = findings
                    .into_iter()
                    .map(|mut f| {
                        f.repair = None;
                        f
                    })
                    .collect();
                return Ok(RunOutcome {
                    text: current,
                    findings,
                    iterations,
                    fixpoint: false,
                });
            }

            tracing::debug!(
                path = %path.display(),
                iteration = iterations,
                edits = edits.len(),
                "applying fixes"
            );
            current = fixer::apply_edits(&current, &edits);
        }
    }

    /// Runs over a set of files, aggregating into a [`RunReport`].
    ///
    /// Per-file IO and parse errors become synthetic error findings rather
    /// than aborting the run.
    #[must_use]
    pub fn run_files(&self, paths: &[PathBuf], fix: bool) -> RunReport {
        let mut report = RunReport::new();
        for path in paths {
            report.files_checked += 1;
            let original = std::fs::read_to_string(path).ok();
            match self.run_file(path, fix) {
                Ok(outcome) => {
                    if original.is_some_and(|o| outcome.changed(&o)) {
                        report.files_fixed += 1;
                    }
                    report.findings.extend(outcome.findings);
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "file skipped");
                    report.findings.push(Finding::new(
                        "TT000",
                        "driver",
                        Severity::Error,
                        Location::new(path.clone(), 1, 1),
                        e.to_string(),
                    ));
                }
            }
        }
        report
    }

    /// One analysis pass: traverse once, dispatching nodes by kind, then
    /// fire file-scope handlers.
    fn collect_findings(&self, source: &SourceFile, scopes: &ScopeIndex) -> Vec<Finding> {
        let active: Vec<&CheckBox> = self
            .checks
            .iter()
            .filter(|c| {
                let enabled = self.config.is_check_enabled(c.name());
                if !enabled {
                    tracing::debug!(check = c.name(), "check disabled by config");
                }
                enabled
            })
            .collect();

        let mut dispatch: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (i, check) in active.iter().enumerate() {
            for &kind in check.node_kinds() {
                dispatch.entry(kind).or_default().push(i);
            }
        }

        let contexts: Vec<CheckContext<'_>> = active
            .iter()
            .map(|check| {
                let mut ctx =
                    CheckContext::new(source, scopes, &*self.dir_lister, &*self.class_order);
                ctx.severity_override = self.config.check_severity(check.name());
                ctx
            })
            .collect();

        let mut poisoned = vec![false; active.len()];
        let mut findings = Vec::new();

        traverse(source.root(), |node| {
            let Some(indices) = dispatch.get(node.kind()) else {
                return;
            };
            for &i in indices {
                if poisoned[i] {
                    continue;
                }
                let check = &active[i];
                match catch_unwind(AssertUnwindSafe(|| check.check_node(node, &contexts[i]))) {
                    Ok(batch) => findings.extend(batch),
                    Err(_) => {
                        tracing::error!(
                            check = check.name(),
                            path = %source.path().display(),
                            "check panicked, disabled for this file"
                        );
                        poisoned[i] = true;
                    }
                }
            }
        });

        for (i, check) in active.iter().enumerate() {
            if poisoned[i] {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| check.check_file(&contexts[i]))) {
                Ok(batch) => findings.extend(batch),
                Err(_) => {
                    tracing::error!(
                        check = check.name(),
                        path = %source.path().display(),
                        "check panicked in file handler"
                    );
                    poisoned[i] = true;
                }
            }
        }

        findings.sort_by(|a, b| {
            (a.location.offset, a.code.as_str()).cmp(&(b.location.offset, b.code.as_str()))
        });
        findings
    }
}

/// Depth-first pre-order traversal over every node in the tree.
fn traverse(root: Node<'_>, mut handler: impl FnMut(Node<'_>)) {
    let mut cursor = root.walk();
    loop {
        handler(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
