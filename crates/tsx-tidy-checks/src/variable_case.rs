//! Check that variable declarations use camelCase.
//!
//! # Rationale
//!
//! Snake- or kebab-cased variable names read as foreign in a JSX/TSX
//! codebase. The fix is a scope-aware rename: the declaration and every
//! reference are rewritten together.
//!
//! # Configuration
//!
//! - `allow_upper_snake`: Allow `UPPER_SNAKE` names, typically module-level
//!   constants (default: true)

use tree_sitter::Node;
use tsx_tidy_conventions::{classify, to_camel, CaseFamily};
use tsx_tidy_core::{Check, CheckContext, Finding, FixRequest, OptionSpec};

/// Check code for variable-case.
pub const CODE: &str = "TT001";

/// Check name for variable-case.
pub const NAME: &str = "variable-case";

/// Flags snake/kebab-cased variable declarations and renames them to
/// camelCase.
#[derive(Debug, Clone)]
pub struct VariableCase {
    /// Allow `UPPER_SNAKE` constant names.
    pub allow_upper_snake: bool,
}

impl Default for VariableCase {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableCase {
    /// Creates the check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_upper_snake: true,
        }
    }

    /// Sets whether `UPPER_SNAKE` names are allowed.
    #[must_use]
    pub fn allow_upper_snake(mut self, allow: bool) -> Self {
        self.allow_upper_snake = allow;
        self
    }
}

impl Check for VariableCase {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Variable declarations should be camelCase"
    }

    fn fixable(&self) -> bool {
        true
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            key: "allow_upper_snake",
            kind: "bool",
            doc: "Allow UPPER_SNAKE constant names",
        }]
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["variable_declarator"]
    }

    fn check_node(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return Vec::new();
        };
        // Destructuring patterns are out of scope here; only direct names.
        if name_node.kind() != "identifier" {
            return Vec::new();
        }

        let name = ctx.source.node_text(name_node);
        let offending = match classify(name) {
            CaseFamily::Snake | CaseFamily::Kebab => true,
            CaseFamily::UpperSnake => !self.allow_upper_snake,
            _ => false,
        };
        if !offending {
            return Vec::new();
        }

        let fixed = to_camel(name);
        if fixed == name {
            return Vec::new();
        }

        vec![ctx
            .finding(
                self,
                name_node,
                format!("variable `{name}` should be camelCase (`{fixed}`)"),
            )
            .with_repair(FixRequest::RenameBinding {
                node_id: name_node.id(),
                span: name_node.byte_range(),
                new_name: fixed,
            })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tsx_tidy_core::Driver;

    fn check(text: &str) -> Vec<Finding> {
        let driver = Driver::builder()
            .with_check(Box::new(VariableCase::new()))
            .build();
        driver
            .run_source(Path::new("src/app.tsx"), text, false)
            .expect("run")
            .findings
    }

    fn fix(text: &str) -> String {
        let driver = Driver::builder()
            .with_check(Box::new(VariableCase::new()))
            .build();
        driver
            .run_source(Path::new("src/app.tsx"), text, true)
            .expect("run")
            .text
    }

    #[test]
    fn flags_snake_case_declaration() {
        let findings = check("const user_name = 'a';\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, CODE);
        assert!(findings[0].message.contains("userName"));
    }

    #[test]
    fn renames_declaration_with_no_other_uses() {
        assert_eq!(fix("const user_name = \"a\";\n"), "const userName = \"a\";\n");
    }

    #[test]
    fn renames_all_references() {
        assert_eq!(
            fix("let item_count = 0;\nitem_count += 1;\nrender(item_count);\n"),
            "let itemCount = 0;\nitemCount += 1;\nrender(itemCount);\n"
        );
    }

    #[test]
    fn allows_upper_snake_constants_by_default() {
        assert!(check("const MAX_RETRIES = 3;\n").is_empty());
    }

    #[test]
    fn strict_mode_flags_upper_snake() {
        let driver = Driver::builder()
            .with_check(Box::new(VariableCase::new().allow_upper_snake(false)))
            .build();
        let outcome = driver
            .run_source(Path::new("src/app.tsx"), "const MAX_RETRIES = 3;\n", true)
            .expect("run");
        assert_eq!(outcome.text, "const maxRetries = 3;\n");
    }

    #[test]
    fn camel_case_is_clean() {
        assert!(check("const userName = 'a';\nconst x = 1;\n").is_empty());
    }

    #[test]
    fn fix_is_idempotent() {
        let fixed = fix("const user_name = 'a';\nlog(user_name);\n");
        assert!(check(&fixed).is_empty());
    }
}
