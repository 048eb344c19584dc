//! Check that boolean declarations carry a boolean prefix.
//!
//! # Rationale
//!
//! `loading` reads as a noun; `isLoading` reads as a predicate. Variables
//! initialized from or typed as `boolean`, and boolean-typed interface
//! properties, get an `is`/`has` prefix.
//!
//! # Configuration
//!
//! - `allowed_prefixes`: Additional prefixes accepted as boolean markers,
//!   on top of the built-in is/has/should/can (default: empty)

use tree_sitter::Node;
use tsx_tidy_conventions::boolean_name;
use tsx_tidy_core::{Check, CheckContext, Finding, FixRequest, OptionSpec};

/// Check code for boolean-naming.
pub const CODE: &str = "TT002";

/// Check name for boolean-naming.
pub const NAME: &str = "boolean-naming";

/// Flags boolean-typed declarations and property signatures whose names
/// lack a boolean prefix.
#[derive(Debug, Clone, Default)]
pub struct BooleanNaming {
    /// Extra accepted prefixes beyond the built-in set.
    pub allowed_prefixes: Vec<String>,
}

impl BooleanNaming {
    /// Creates the check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the accepted prefix set.
    #[must_use]
    pub fn allowed_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.allowed_prefixes = prefixes;
        self
    }

    fn is_acceptable(&self, name: &str) -> bool {
        if boolean_name(name) == name {
            return true;
        }
        self.allowed_prefixes.iter().any(|p| {
            name.strip_prefix(p.as_str())
                .is_some_and(|rest| rest.starts_with(char::is_uppercase))
        })
    }
}

/// True when a declarator is boolean-typed or boolean-initialized.
fn is_boolean_declarator(node: Node<'_>, ctx: &CheckContext<'_>) -> bool {
    if let Some(value) = node.child_by_field_name("value") {
        if matches!(value.kind(), "true" | "false") {
            return true;
        }
    }
    node.child_by_field_name("type")
        .is_some_and(|t| annotation_is_boolean(t, ctx))
}

/// True when a `type_annotation` node annotates plain `boolean`.
fn annotation_is_boolean(annotation: Node<'_>, ctx: &CheckContext<'_>) -> bool {
    let mut cursor = annotation.walk();
    let is_boolean = annotation
        .named_children(&mut cursor)
        .any(|c| c.kind() == "predefined_type" && ctx.source.node_text(c) == "boolean");
    is_boolean
}

impl Check for BooleanNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Boolean declarations should carry an is/has prefix"
    }

    fn fixable(&self) -> bool {
        true
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            key: "allowed_prefixes",
            kind: "string[]",
            doc: "Additional prefixes accepted as boolean markers",
        }]
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["variable_declarator", "property_signature"]
    }

    fn check_node(&self, node: Node<'_>, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return Vec::new();
        };
        match node.kind() {
            "variable_declarator" => {
                if name_node.kind() != "identifier" || !is_boolean_declarator(node, ctx) {
                    return Vec::new();
                }
            }
            "property_signature" => {
                let boolean = node
                    .child_by_field_name("type")
                    .is_some_and(|t| annotation_is_boolean(t, ctx));
                if !boolean {
                    return Vec::new();
                }
            }
            _ => return Vec::new(),
        }

        let name = ctx.source.node_text(name_node);
        if self.is_acceptable(name) {
            return Vec::new();
        }
        let fixed = boolean_name(name);

        // Property names are not bindings; the synthesizer degrades the
        // rename to a single-site edit there.
        vec![ctx
            .finding(
                self,
                name_node,
                format!("boolean `{name}` should be named `{fixed}`"),
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

    fn driver() -> Driver {
        Driver::builder()
            .with_check(Box::new(BooleanNaming::new()))
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
    fn flags_boolean_initializer() {
        let findings = check("const loading = true;\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("isLoading"));
    }

    #[test]
    fn flags_boolean_type_annotation() {
        let findings = check("let visible: boolean = compute();\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("isVisible"));
    }

    #[test]
    fn renames_declaration_and_references() {
        assert_eq!(
            fix("const loading = true;\nif (loading) { spin(); }\n"),
            "const isLoading = true;\nif (isLoading) { spin(); }\n"
        );
    }

    #[test]
    fn shorthand_object_use_expands_to_pair() {
        assert_eq!(
            fix("const copied = true;\nconst state = { copied };\n"),
            "const isCopied = true;\nconst state = { copied: isCopied };\n"
        );
    }

    #[test]
    fn denylist_keyword_selects_has() {
        assert_eq!(fix("const error = false;\n"), "const hasError = false;\n");
    }

    #[test]
    fn property_signature_gets_single_site_edit() {
        let fixed = fix("interface Props {\n  loading: boolean;\n  count: number;\n}\n");
        assert_eq!(
            fixed,
            "interface Props {\n  isLoading: boolean;\n  count: number;\n}\n"
        );
    }

    #[test]
    fn prefixed_names_are_clean() {
        assert!(check("const isOpen = true;\nconst hasError = false;\n").is_empty());
        assert!(check("const shouldRetry: boolean = probe();\n").is_empty());
    }

    #[test]
    fn non_boolean_declarations_are_ignored() {
        assert!(check("const loading = 'spinner';\nconst count = 0;\n").is_empty());
    }

    #[test]
    fn allowed_prefixes_extend_the_accepted_set() {
        let driver = Driver::builder()
            .with_check(Box::new(
                BooleanNaming::new().allowed_prefixes(vec!["was".to_owned()]),
            ))
            .build();
        let findings = driver
            .run_source(Path::new("src/app.tsx"), "const wasSeen = true;\n", false)
            .expect("run")
            .findings;
        assert!(findings.is_empty());
    }

    #[test]
    fn fix_is_idempotent() {
        let fixed = fix("const copied = true;\nlog(copied);\n");
        assert!(check(&fixed).is_empty());
    }
}
