//! Core types for findings, fixes, and run reports.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail a check run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }

    /// The half-open byte range this location covers.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// A half-open source-offset range replaced by new text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// Byte range to replace.
    pub range: Range<usize>,
    /// Replacement text.
    pub replacement: String,
}

impl TextEdit {
    /// Creates a new edit.
    #[must_use]
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// True when this edit's range intersects `other`'s.
    #[must_use]
    pub fn overlaps(&self, other: &Range<usize>) -> bool {
        self.range.start < other.end && other.start < self.range.end
    }
}

/// An ordered set of text edits realizing one finding's correction.
///
/// Edits are pairwise non-overlapping and sorted by start offset; the
/// constructor enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    edits: Vec<TextEdit>,
}

impl Fix {
    /// Builds a fix from edits, sorting them by start offset.
    ///
    /// Returns `None` when two edits overlap: an internally-conflicting fix
    /// is never applied.
    #[must_use]
    pub fn from_edits(mut edits: Vec<TextEdit>) -> Option<Self> {
        edits.sort_by_key(|e| (e.range.start, e.range.end));
        for pair in edits.windows(2) {
            if pair[1].range.start < pair[0].range.end {
                return None;
            }
        }
        Some(Self { edits })
    }

    /// The edits, sorted by start offset.
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Start offset of the first edit, used for pass ordering.
    #[must_use]
    pub fn first_offset(&self) -> usize {
        self.edits.first().map_or(0, |e| e.range.start)
    }
}

/// A fix request attached to a finding, expanded by the fix synthesizer.
#[derive(Debug, Clone)]
pub enum FixRequest {
    /// Replace the given ranges directly.
    Edits(Vec<TextEdit>),
    /// Rename a binding and every one of its use sites as one atomic set.
    ///
    /// `node_id` anchors the identifier (declaration or use) the finding is
    /// attached to; when it resolves to no binding the synthesizer degrades
    /// to a single-site edit at `span`.
    RenameBinding {
        /// Tree-sitter node id of the anchor identifier.
        node_id: usize,
        /// Byte range of the anchor identifier.
        span: Range<usize>,
        /// The replacement name.
        new_name: String,
    },
}

/// A reported style violation, with an optional fix request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Check code (e.g., "TT001").
    pub code: String,
    /// Check name (e.g., "variable-case").
    pub check: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Anchor location of the finding.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Fix request, expanded to concrete edits by the synthesizer.
    /// Transient: discarded after each apply step.
    #[serde(skip)]
    pub repair: Option<FixRequest>,
}

impl Finding {
    /// Creates a new finding without a fix.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        check: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            check: check.into(),
            severity,
            location,
            message: message.into(),
            repair: None,
        }
    }

    /// Attaches a fix request to this finding.
    #[must_use]
    pub fn with_repair(mut self, repair: FixRequest) -> Self {
        self.repair = Some(repair);
        self
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.check,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if self.repair.is_some() {
            let _ = writeln!(output, "  = fix available");
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Converts a Finding to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Finding> for FindingDiagnostic {
    fn from(f: &Finding) -> Self {
        Self {
            message: format!("[{}] {}", f.code, f.message),
            span: SourceSpan::from((f.location.offset, f.location.length)),
            label_message: f.check.clone(),
        }
    }
}

/// Result of running checks over a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// All findings left after fixing.
    pub findings: Vec<Finding>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of files whose text changed.
    pub files_fixed: usize,
}

impl RunReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Checks if any findings meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }

    /// Counts findings by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let errors = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warnings = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count();
        let infos = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Info)
            .count();
        (errors, warnings, infos)
    }

    /// Adds findings from another report.
    pub fn extend(&mut self, other: Self) {
        self.findings.extend(other.findings);
        self.files_checked += other.files_checked;
        self.files_fixed += other.files_fixed;
    }
}
