//! Check that a file's primary component matches its path-derived name.
//!
//! # Rationale
//!
//! `layouts/auth/index.tsx` exporting `Auth` hides what the module is; the
//! folder chain already spells `AuthLayout`. The expected name is derived
//! from the path (index files contribute no segment, grouping folders are
//! elided, the folder table decorates), and the fix is a full scope-aware
//! rename.
//!
//! Index files whose directory also holds sibling component files are
//! treated as barrel files and skipped; the directory listing collaborator
//! answers that question.

use tree_sitter::Node;
use tsx_tidy_conventions::{derive_expected_name, NameKind};
use tsx_tidy_core::{Check, CheckContext, Finding, FixRequest};

/// Check code for derived-component-name.
pub const CODE: &str = "TT004";

/// Check name for derived-component-name.
pub const NAME: &str = "derived-component-name";

/// Flags the primary exported arrow component when its name does not match
/// the name derived from the file path.
#[derive(Debug, Clone, Default)]
pub struct DerivedComponentName;

impl DerivedComponentName {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Finds the name node of the last exported arrow component at top level.
fn primary_component<'t>(root: Node<'t>) -> Option<Node<'t>> {
    let mut cursor = root.walk();
    let mut found = None;
    for statement in root.named_children(&mut cursor) {
        if statement.kind() != "export_statement" {
            continue;
        }
        let Some(declaration) = statement.child_by_field_name("declaration") else {
            continue;
        };
        if declaration.kind() != "lexical_declaration" {
            continue;
        }
        let mut decl_cursor = declaration.walk();
        for declarator in declaration.named_children(&mut decl_cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let name = declarator.child_by_field_name("name");
            let value = declarator.child_by_field_name("value");
            if let (Some(name), Some(value)) = (name, value) {
                if name.kind() == "identifier" && value.kind() == "arrow_function" {
                    found = Some(name);
                }
            }
        }
    }
    found
}

/// True when an index file's directory holds sibling component sources,
/// which makes the index a barrel re-export rather than the component.
fn is_barrel_index(ctx: &CheckContext<'_>) -> bool {
    let path = ctx.source.path();
    let stem = path.file_stem().and_then(|s| s.to_str());
    if stem != Some("index") {
        return false;
    }
    let Some(parent) = path.parent() else {
        return false;
    };
    ctx.dir_lister.list(parent).iter().any(|entry| {
        !entry.is_dir
            && !entry.name.starts_with("index.")
            && (entry.name.ends_with(".tsx") || entry.name.ends_with(".jsx"))
    })
}

impl Check for DerivedComponentName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "The primary exported component should match its path-derived name"
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check_file(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let Some(expected) = derive_expected_name(ctx.source.path(), NameKind::Component) else {
            return Vec::new();
        };
        if is_barrel_index(ctx) {
            tracing::debug!(path = %ctx.source.path().display(), "barrel index file, skipping");
            return Vec::new();
        }
        let Some(name_node) = primary_component(ctx.source.root()) else {
            return Vec::new();
        };

        let actual = ctx.source.node_text(name_node);
        if actual == expected {
            return Vec::new();
        }

        vec![ctx
            .finding(
                self,
                name_node,
                format!("component `{actual}` should be named `{expected}` after its path"),
            )
            .with_repair(FixRequest::RenameBinding {
                node_id: name_node.id(),
                span: name_node.byte_range(),
                new_name: expected,
            })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tsx_tidy_core::{DirEntryInfo, DirLister, Driver};

    struct FixedListing(Vec<DirEntryInfo>);

    impl DirLister for FixedListing {
        fn list(&self, _path: &Path) -> Vec<DirEntryInfo> {
            self.0.clone()
        }
    }

    fn driver() -> Driver {
        Driver::builder()
            .with_check(Box::new(DerivedComponentName::new()))
            .build()
    }

    #[test]
    fn flags_mismatched_layout_index() {
        let findings = driver()
            .run_source(
                Path::new("src/layouts/auth/index.tsx"),
                "export const Auth = () => <div>auth</div>;\n",
                false,
            )
            .expect("run")
            .findings;
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("AuthLayout"));
    }

    #[test]
    fn renames_component_and_its_uses() {
        let outcome = driver()
            .run_source(
                Path::new("src/layouts/auth/index.tsx"),
                "export const Auth = () => <div>auth</div>;\nexport default Auth;\n",
                true,
            )
            .expect("run");
        assert_eq!(
            outcome.text,
            "export const AuthLayout = () => <div>auth</div>;\nexport default AuthLayout;\n"
        );
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn matching_name_is_clean() {
        let findings = driver()
            .run_source(
                Path::new("src/layouts/auth/index.tsx"),
                "export const AuthLayout = () => <div>auth</div>;\n",
                false,
            )
            .expect("run")
            .findings;
        assert!(findings.is_empty());
    }

    #[test]
    fn last_exported_arrow_component_is_primary() {
        let findings = driver()
            .run_source(
                Path::new("src/pages/stories/index.tsx"),
                "export const helper = () => 1;\nexport const Stories = () => <ul />;\n",
                false,
            )
            .expect("run")
            .findings;
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("StoryPage"));
    }

    #[test]
    fn barrel_index_is_skipped() {
        let listing = FixedListing(vec![
            DirEntryInfo {
                name: "index.tsx".to_owned(),
                is_dir: false,
            },
            DirEntryInfo {
                name: "avatar.tsx".to_owned(),
                is_dir: false,
            },
        ]);
        let driver = Driver::builder()
            .with_check(Box::new(DerivedComponentName::new()))
            .with_dir_lister(Box::new(listing))
            .build();
        let findings = driver
            .run_source(
                Path::new("src/components/user/index.tsx"),
                "export const Stuff = () => <div />;\n",
                false,
            )
            .expect("run")
            .findings;
        assert!(findings.is_empty());
    }

    #[test]
    fn files_without_exported_components_are_ignored() {
        let findings = driver()
            .run_source(
                Path::new("src/layouts/auth/index.tsx"),
                "const helper = () => 1;\n",
                false,
            )
            .expect("run")
            .findings;
        assert!(findings.is_empty());
    }
}
