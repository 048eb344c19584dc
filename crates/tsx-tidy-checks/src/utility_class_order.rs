//! Check that `className` utility lists follow the canonical category order.
//!
//! # Rationale
//!
//! Utility-class strings are scannable only when every file orders them the
//! same way (layout first, effects last). The ordering policy lives in the
//! class-order collaborator; this check only compares and replaces.

use tree_sitter::Node;
use tsx_tidy_core::{Check, CheckContext, Finding, FixRequest, TextEdit};

/// Check code for utility-class-order.
pub const CODE: &str = "TT005";

/// Check name for utility-class-order.
pub const NAME: &str = "utility-class-order";

/// Flags `className` string attributes whose token order differs from the
/// collaborator's canonical ordering.
#[derive(Debug, Clone, Default)]
pub struct UtilityClassOrder;

impl UtilityClassOrder {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Finds the `string_fragment` of a plain string attribute value.
fn string_fragment<'t>(attribute: Node<'t>) -> Option<Node<'t>> {
    let mut cursor = attribute.walk();
    let value = attribute
        .named_children(&mut cursor)
        .find(|c| c.kind() == "string")?;
    let mut value_cursor = value.walk();
    let fragment = value
        .named_children(&mut value_cursor)
        .find(|c| c.kind() == "string_fragment");
    fragment
}

impl Check for UtilityClassOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "className utility lists should follow the canonical category order"
    }

    fn fixable(&self) -> bool {
        true
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["jsx_attribute"]
    }

    fn check_node(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let Some(name_node) = node.named_child(0) else {
            return Vec::new();
        };
        if ctx.source.node_text(name_node) != "className" {
            return Vec::new();
        }
        let Some(fragment) = string_fragment(node) else {
            return Vec::new();
        };

        let text = ctx.source.node_text(fragment);
        if !ctx.class_order.looks_like_utility_list(text) {
            return Vec::new();
        }
        let sorted = ctx.class_order.sort(text);
        if sorted == text {
            return Vec::new();
        }

        vec![ctx
            .finding(
                self,
                fragment,
                format!("utility classes are out of order (expected \"{sorted}\")"),
            )
            .with_repair(FixRequest::Edits(vec![TextEdit::new(
                fragment.byte_range(),
                sorted,
            )]))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tsx_tidy_core::Driver;

    fn driver() -> Driver {
        Driver::builder()
            .with_check(Box::new(UtilityClassOrder::new()))
            .build()
    }

    fn check(text: &str) -> Vec<Finding> {
        driver()
            .run_source(Path::new("src/app.tsx"), text, false)
            .expect("run")
            .findings
    }

    fn fix(text: &str) -> String {
        driver()
            .run_source(Path::new("src/app.tsx"), text, true)
            .expect("run")
            .text
    }

    #[test]
    fn flags_out_of_order_list() {
        let findings = check("const App = () => <div className=\"bg-white flex p-2\" />;\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, CODE);
    }

    #[test]
    fn reorders_the_list() {
        assert_eq!(
            fix("const App = () => <div className=\"bg-white flex p-2\" />;\n"),
            "const App = () => <div className=\"flex p-2 bg-white\" />;\n"
        );
    }

    #[test]
    fn ordered_list_is_clean() {
        assert!(check("const App = () => <div className=\"flex p-2 bg-white\" />;\n").is_empty());
    }

    #[test]
    fn non_utility_strings_are_ignored() {
        assert!(check("const App = () => <div className=\"Sign In\" />;\n").is_empty());
        assert!(check("const App = () => <div className=\"banner\" />;\n").is_empty());
    }

    #[test]
    fn expression_values_are_ignored() {
        assert!(check("const App = () => <div className={classes} />;\n").is_empty());
    }

    #[test]
    fn other_attributes_are_ignored() {
        assert!(check("const App = () => <div title=\"bg-white flex\" />;\n").is_empty());
    }

    #[test]
    fn fix_is_idempotent() {
        let fixed = fix("const App = () => <div className=\"shadow flex bg-white p-2\" />;\n");
        assert!(check(&fixed).is_empty());
    }
}
