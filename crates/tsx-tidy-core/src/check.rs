//! Check trait: the boundary between the driver and individual checks.

use tree_sitter::Node;

use crate::context::CheckContext;
use crate::types::{Finding, Severity};

/// Declarative description of one option a check accepts in config.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// Option key as written in `tsx-tidy.toml`.
    pub key: &'static str,
    /// Value shape ("bool", "string", "string[]", ...).
    pub kind: &'static str,
    /// One-line description.
    pub doc: &'static str,
}

/// A style-conformance check.
///
/// A check registers interest in a set of tree node kinds; the driver
/// dispatches matching nodes to [`Check::check_node`] during its single
/// traversal pass, then calls [`Check::check_file`] once after traversal for
/// file-scope concerns. Handlers receive read-only context and never mutate
/// the tree.
///
/// A panicking handler aborts only that check for that file; the driver
/// logs it and continues with the remaining checks.
///
/// # Example
///
/// ```ignore
/// use tsx_tidy_core::{Check, CheckContext, Finding};
///
/// pub struct NoDebugger;
///
/// impl Check for NoDebugger {
///     fn name(&self) -> &'static str { "no-debugger" }
///     fn code(&self) -> &'static str { "TT900" }
///     fn node_kinds(&self) -> &'static [&'static str] { &["debugger_statement"] }
///
///     fn check_node(&self, node: tree_sitter::Node<'_>, ctx: &CheckContext<'_>) -> Vec<Finding> {
///         vec![ctx.finding(self, node, "remove debugger statement")]
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the kebab-case name of this check (e.g., "variable-case").
    fn name(&self) -> &'static str;

    /// Returns the check code (e.g., "TT001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this check enforces.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this check.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether this check can attach fix requests to its findings.
    fn fixable(&self) -> bool {
        false
    }

    /// Options this check accepts, for `list-checks` and config validation.
    fn options(&self) -> &'static [OptionSpec] {
        &[]
    }

    /// Node kinds this check wants dispatched to [`Check::check_node`].
    fn node_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Handles one matching node; fires once per match during traversal.
    fn check_node(&self, _node: Node<'_>, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        Vec::new()
    }

    /// Fires once per file after traversal, for file-scope checks.
    fn check_file(&self, _ctx: &CheckContext<'_>) -> Vec<Finding> {
        Vec::new()
    }
}

/// Type alias for boxed Check trait objects.
pub type CheckBox = Box<dyn Check>;
