//! Read-only context handed to checks during a driver pass.

use std::ops::Range;

use tree_sitter::Node;
use tsx_tidy_syntax::{ScopeIndex, SourceFile};

use crate::check::Check;
use crate::collab::{ClassOrder, DirLister};
use crate::types::{Finding, Location, Severity};

/// Everything a check may consult while handling a node or a file.
///
/// All of it is read-only; the only mutation in a pass is the driver's own
/// conflict-resolution step, which runs after every handler has returned.
pub struct CheckContext<'a> {
    /// The parsed source model.
    pub source: &'a SourceFile,
    /// Scope index built for this iteration.
    pub scopes: &'a ScopeIndex,
    /// Directory-listing collaborator for folder-convention checks.
    pub dir_lister: &'a dyn DirLister,
    /// Utility-class ordering collaborator.
    pub class_order: &'a dyn ClassOrder,
    /// Severity override for the check currently running, if configured.
    pub severity_override: Option<Severity>,
}

impl<'a> CheckContext<'a> {
    /// Creates a context for one pass over one file.
    #[must_use]
    pub fn new(
        source: &'a SourceFile,
        scopes: &'a ScopeIndex,
        dir_lister: &'a dyn DirLister,
        class_order: &'a dyn ClassOrder,
    ) -> Self {
        Self {
            source,
            scopes,
            dir_lister,
            class_order,
            severity_override: None,
        }
    }

    /// Location of a node in the current file.
    #[must_use]
    pub fn location(&self, node: Node<'_>) -> Location {
        self.span_location(&node.byte_range())
    }

    /// Location of a byte range in the current file.
    #[must_use]
    pub fn span_location(&self, range: &Range<usize>) -> Location {
        let (line, column) = self.source.line_col(range.start);
        Location::new(self.source.path().to_path_buf(), line, column)
            .with_span(range.start, range.end.saturating_sub(range.start))
    }

    /// Builds a finding anchored at `node` with the check's identity and
    /// effective severity.
    #[must_use]
    pub fn finding(&self, check: &dyn Check, node: Node<'_>, message: impl Into<String>) -> Finding {
        self.finding_at(check, &node.byte_range(), message)
    }

    /// Builds a finding anchored at a byte range.
    #[must_use]
    pub fn finding_at(
        &self,
        check: &dyn Check,
        range: &Range<usize>,
        message: impl Into<String>,
    ) -> Finding {
        Finding::new(
            check.code(),
            check.name(),
            self.severity_override.unwrap_or_else(|| check.default_severity()),
            self.span_location(range),
            message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{DefaultClassOrder, FsDirLister};
    use tsx_tidy_syntax::ScopeIndex;

    struct DummyCheck;

    impl Check for DummyCheck {
        fn name(&self) -> &'static str {
            "dummy"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn default_severity(&self) -> Severity {
            Severity::Info
        }
    }

    #[test]
    fn finding_carries_check_identity_and_span() {
        let source = SourceFile::parse("a.tsx", "const n = 1;\n").expect("parse");
        let scopes = ScopeIndex::build(&source);
        let lister = FsDirLister;
        let order = DefaultClassOrder::new();
        let ctx = CheckContext::new(&source, &scopes, &lister, &order);

        let f = ctx.finding_at(&DummyCheck, &(6..7), "n is short");
        assert_eq!(f.code, "TEST001");
        assert_eq!(f.check, "dummy");
        assert_eq!(f.severity, Severity::Info);
        assert_eq!(f.location.line, 1);
        assert_eq!(f.location.column, 7);
        assert_eq!(f.location.byte_range(), 6..7);
    }

    #[test]
    fn severity_override_wins() {
        let source = SourceFile::parse("a.tsx", "const n = 1;\n").expect("parse");
        let scopes = ScopeIndex::build(&source);
        let lister = FsDirLister;
        let order = DefaultClassOrder::new();
        let mut ctx = CheckContext::new(&source, &scopes, &lister, &order);
        ctx.severity_override = Some(Severity::Error);

        let f = ctx.finding_at(&DummyCheck, &(0..5), "msg");
        assert_eq!(f.severity, Severity::Error);
    }
}
