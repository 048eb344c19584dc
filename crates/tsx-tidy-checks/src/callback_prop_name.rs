//! Check that JSX callback props use `on*` naming.
//!
//! # Rationale
//!
//! `handleClick`/`clickHandler` name the implementation; the prop is the
//! event surface and reads as `onClick`. Only the attribute name changes;
//! the handler variable keeps its name.

use tree_sitter::Node;
use tsx_tidy_conventions::callback_name;
use tsx_tidy_core::{Check, CheckContext, Finding, FixRequest, TextEdit};

/// Check code for callback-prop-name.
pub const CODE: &str = "TT003";

/// Check name for callback-prop-name.
pub const NAME: &str = "callback-prop-name";

/// Flags `handle*`/`*Handler` JSX attributes whose value is a function and
/// renames the attribute to its `on*` form.
#[derive(Debug, Clone, Default)]
pub struct CallbackPropName;

impl CallbackPropName {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// True when the attribute name is handler-shaped.
fn is_handler_name(name: &str) -> bool {
    let handle_prefixed = name
        .strip_prefix("handle")
        .is_some_and(|rest| rest.starts_with(char::is_uppercase));
    handle_prefixed || (name.ends_with("Handler") && name != "Handler")
}

/// True when the attribute value is (or plausibly references) a function.
fn value_is_function(attribute: Node<'_>) -> bool {
    let mut cursor = attribute.walk();
    let Some(value) = attribute
        .named_children(&mut cursor)
        .find(|c| c.kind() == "jsx_expression")
    else {
        return false;
    };
    let mut inner_cursor = value.walk();
    let is_function = value.named_children(&mut inner_cursor).any(|c| {
        matches!(
            c.kind(),
            "arrow_function" | "function_expression" | "identifier" | "member_expression"
        )
    });
    is_function
}

impl Check for CallbackPropName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "JSX callback props should be named on*"
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
        if name_node.kind() != "property_identifier" {
            return Vec::new();
        }
        let name = ctx.source.node_text(name_node);
        if !is_handler_name(name) || !value_is_function(node) {
            return Vec::new();
        }

        let fixed = callback_name(name);
        if fixed == name {
            return Vec::new();
        }

        // Attribute names are not bindings; this is a single-site edit.
        vec![ctx
            .finding(
                self,
                name_node,
                format!("callback prop `{name}` should be named `{fixed}`"),
            )
            .with_repair(FixRequest::Edits(vec![TextEdit::new(
                name_node.byte_range(),
                fixed,
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
            .with_check(Box::new(CallbackPropName::new()))
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
    fn flags_handle_prefixed_prop() {
        let findings = check("const App = () => <Button handleClick={() => save()} />;\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("onClick"));
    }

    #[test]
    fn renames_only_the_attribute() {
        assert_eq!(
            fix("const App = () => <Button handleClick={handleClick} />;\n"),
            "const App = () => <Button onClick={handleClick} />;\n"
        );
    }

    #[test]
    fn flags_handler_suffixed_prop() {
        assert_eq!(
            fix("const App = () => <Form submitHandler={submit} />;\n"),
            "const App = () => <Form onSubmit={submit} />;\n"
        );
    }

    #[test]
    fn on_prefixed_props_are_clean() {
        assert!(check("const App = () => <Button onClick={save} />;\n").is_empty());
    }

    #[test]
    fn non_function_values_are_ignored() {
        assert!(check("const App = () => <Button handleClick=\"save\" />;\n").is_empty());
    }

    #[test]
    fn handle_must_be_a_word_prefix() {
        assert!(check("const App = () => <Button handles={save} />;\n").is_empty());
    }

    #[test]
    fn fix_is_idempotent() {
        let fixed = fix("const App = () => <Button handleClick={() => save()} />;\n");
        assert!(check(&fixed).is_empty());
    }
}
