//! Scope index: lexical scopes, bindings, and resolved references.
//!
//! Built once per driver iteration from a [`SourceFile`] with a single
//! depth-first walk. Each declaration node creates a [`Binding`] in the
//! current scope; each identifier use resolves innermost-scope-first to a
//! binding or is recorded as free. Free names are excluded from renames and
//! treated as external.
//!
//! The walk is single-pass: a use that lexically precedes its declaration
//! within the same scope (hoisting) stays free. Such references are left out
//! of renames rather than guessed at.

use std::collections::HashMap;
use std::ops::Range;

use tree_sitter::Node;

use crate::source::SourceFile;

/// Identifies a [`Scope`] inside a [`ScopeIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Identifies a [`Binding`] inside a [`ScopeIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

/// What kind of declaration introduced a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `const x = ...`, `let x`, `var x`, or a class name.
    Variable,
    /// A function or method parameter.
    Parameter,
    /// A name bound inside an object/array destructuring pattern.
    Destructured,
    /// A `function f() {}` declaration name.
    Function,
    /// A name introduced by an import statement.
    Import,
}

/// A declared identifier and its scope of validity.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Declared name.
    pub name: String,
    /// Byte range of the declaration identifier.
    pub span: Range<usize>,
    /// Tree-sitter node id of the declaration identifier.
    pub node_id: usize,
    /// Scope owning this binding.
    pub scope: ScopeId,
    /// Declaration kind.
    pub kind: BindingKind,
    /// True when the declaration is a shorthand destructuring pattern
    /// (`{ name }`), where the node is simultaneously key and value and a
    /// rename must expand it to `{ name: newName }`.
    pub shorthand: bool,
}

/// One identifier occurrence resolved to exactly one binding.
#[derive(Debug, Clone)]
pub struct Reference {
    /// Byte range of the identifier.
    pub span: Range<usize>,
    /// Tree-sitter node id of the identifier.
    pub node_id: usize,
    /// The binding this reference resolves to.
    pub binding: BindingId,
    /// True when the use site is an object-literal shorthand (`{ name }`)
    /// that a rename must expand to `{ name: newName }`.
    pub shorthand: bool,
}

/// An identifier that resolved to no binding via the scope chain.
#[derive(Debug, Clone)]
pub struct FreeReference {
    /// The unresolved name.
    pub name: String,
    /// Byte range of the identifier.
    pub span: Range<usize>,
    /// Tree-sitter node id of the identifier.
    pub node_id: usize,
}

/// A lexical region owning bindings, linked to a parent scope.
#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    names: HashMap<String, BindingId>,
}

/// Scopes, bindings, and per-binding ordered reference lists for one file.
///
/// Rebuilt from scratch every driver iteration; findings and fixes from a
/// previous iteration never see a stale index.
#[derive(Debug)]
pub struct ScopeIndex {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    references: Vec<Vec<Reference>>,
    free: Vec<FreeReference>,
    by_node: HashMap<usize, BindingId>,
}

impl ScopeIndex {
    /// Builds the index with a single depth-first walk over the tree.
    #[must_use]
    pub fn build(source: &SourceFile) -> Self {
        let mut builder = Builder {
            source,
            index: ScopeIndex {
                scopes: Vec::new(),
                bindings: Vec::new(),
                references: Vec::new(),
                free: Vec::new(),
                by_node: HashMap::new(),
            },
            declared_nodes: HashMap::new(),
        };
        let root_scope = builder.push_scope(None);
        builder.visit(source.root(), root_scope);
        builder.index
    }

    /// The program-level scope.
    #[must_use]
    pub fn root_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Looks a name up in `scope`, then recursively in its parents.
    ///
    /// Deterministic and total: returns `None` when no enclosing scope
    /// declares `name`.
    #[must_use]
    pub fn find_binding(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let mut current = Some(scope);
        while let Some(s) = current {
            let scope = &self.scopes[s.0];
            if let Some(&b) = scope.names.get(name) {
                return Some(b);
            }
            current = scope.parent;
        }
        None
    }

    /// The binding behind an id.
    #[must_use]
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0]
    }

    /// All bindings, in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings.iter().enumerate().map(|(i, b)| (BindingId(i), b))
    }

    /// Use-site references of a binding, in source order.
    ///
    /// The declaration site is not repeated here; rename synthesis visits
    /// `references(binding) ∪ {declaration}` exactly once.
    #[must_use]
    pub fn references(&self, id: BindingId) -> &[Reference] {
        &self.references[id.0]
    }

    /// Resolves a declaration or reference node id to its binding.
    ///
    /// This is the fix synthesizer's entry point: given the identifier node
    /// a finding is anchored at, it yields the binding whose full reference
    /// set a rename must rewrite.
    #[must_use]
    pub fn resolve_node(&self, node_id: usize) -> Option<BindingId> {
        self.by_node.get(&node_id).copied()
    }

    /// Identifiers that resolved to no binding, in source order.
    #[must_use]
    pub fn free_references(&self) -> &[FreeReference] {
        &self.free
    }
}

/// Node kinds that open a new lexical scope.
fn is_scope_node(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
            | "statement_block"
            | "for_statement"
            | "for_in_statement"
            | "catch_clause"
    )
}

/// Node kinds that carry parameter lists.
fn is_function_node(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
    )
}

struct Builder<'a> {
    source: &'a SourceFile,
    index: ScopeIndex,
    /// Identifier node ids consumed as declarations; the generic walk skips
    /// them when it reaches them again.
    declared_nodes: HashMap<usize, BindingId>,
}

impl<'a> Builder<'a> {
    fn push_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.index.scopes.len());
        self.index.scopes.push(Scope {
            parent,
            names: HashMap::new(),
        });
        id
    }

    fn declare(&mut self, node: Node<'a>, scope: ScopeId, kind: BindingKind, shorthand: bool) {
        let name = self.source.node_text(node).to_owned();
        let id = BindingId(self.index.bindings.len());
        self.index.bindings.push(Binding {
            name: name.clone(),
            span: node.byte_range(),
            node_id: node.id(),
            scope,
            kind,
            shorthand,
        });
        self.index.references.push(Vec::new());
        self.index.by_node.insert(node.id(), id);
        self.declared_nodes.insert(node.id(), id);
        // Later declarations of the same name in one scope win, matching
        // lexical re-declaration.
        self.index.scopes[scope.0].names.insert(name, id);
    }

    /// Declares every name bound by a pattern node.
    ///
    /// `kind` applies to a directly-bound identifier; names nested inside
    /// object/array patterns become [`BindingKind::Destructured`].
    fn declare_pattern(&mut self, node: Node<'a>, scope: ScopeId, kind: BindingKind) {
        match node.kind() {
            "identifier" => self.declare(node, scope, kind, false),
            "shorthand_property_identifier_pattern" => {
                self.declare(node, scope, BindingKind::Destructured, true);
            }
            "object_pattern" | "array_pattern" => {
                let mut cursor = node.walk();
                let children: Vec<Node<'a>> = node.named_children(&mut cursor).collect();
                for child in children {
                    self.declare_pattern(child, scope, BindingKind::Destructured);
                }
            }
            "pair_pattern" => {
                // The key stays untouched; only the value pattern binds.
                if let Some(value) = node.child_by_field_name("value") {
                    self.declare_pattern(value, scope, BindingKind::Destructured);
                }
            }
            "rest_pattern" => {
                let mut cursor = node.walk();
                let children: Vec<Node<'a>> = node.named_children(&mut cursor).collect();
                for child in children {
                    self.declare_pattern(child, scope, kind);
                }
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                // Default value expressions are visited as references by the
                // generic walk; only the left side binds.
                if let Some(left) = node.child_by_field_name("left") {
                    self.declare_pattern(left, scope, kind);
                }
            }
            _ => {}
        }
    }

    fn declare_parameters(&mut self, func: Node<'a>, scope: ScopeId) {
        // `x => ...` single-identifier form.
        if let Some(param) = func.child_by_field_name("parameter") {
            self.declare_pattern(param, scope, BindingKind::Parameter);
        }
        let Some(params) = func.child_by_field_name("parameters") else {
            return;
        };
        let mut cursor = params.walk();
        let children: Vec<Node<'a>> = params.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "required_parameter" | "optional_parameter" => {
                    if let Some(pattern) = child.child_by_field_name("pattern") {
                        self.declare_pattern(pattern, scope, BindingKind::Parameter);
                    }
                }
                // Plain identifier/pattern parameters (JS-style lists).
                "identifier" | "object_pattern" | "array_pattern" | "rest_pattern"
                | "assignment_pattern" => {
                    self.declare_pattern(child, scope, BindingKind::Parameter);
                }
                _ => {}
            }
        }
    }

    fn declare_import(&mut self, node: Node<'a>, scope: ScopeId) {
        let Some(clause) = node
            .named_children(&mut node.walk())
            .find(|c| c.kind() == "import_clause")
        else {
            return;
        };
        let mut cursor = clause.walk();
        let children: Vec<Node<'a>> = clause.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "identifier" => self.declare(child, scope, BindingKind::Import, false),
                "namespace_import" => {
                    let mut ns_cursor = child.walk();
                    let inner: Vec<Node<'a>> = child.named_children(&mut ns_cursor).collect();
                    for n in inner {
                        if n.kind() == "identifier" {
                            self.declare(n, scope, BindingKind::Import, false);
                        }
                    }
                }
                "named_imports" => {
                    let mut spec_cursor = child.walk();
                    let specs: Vec<Node<'a>> = child.named_children(&mut spec_cursor).collect();
                    for spec in specs {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        // `import { a as b }` binds b; `import { a }` binds a.
                        let bound = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(n) = bound {
                            self.declare(n, scope, BindingKind::Import, false);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn resolve_use(&mut self, node: Node<'a>, scope: ScopeId, shorthand: bool) {
        let name = self.source.node_text(node);
        match self.index.find_binding(scope, name) {
            Some(binding) => {
                self.index.references[binding.0].push(Reference {
                    span: node.byte_range(),
                    node_id: node.id(),
                    binding,
                    shorthand,
                });
                self.index.by_node.insert(node.id(), binding);
            }
            None => self.index.free.push(FreeReference {
                name: name.to_owned(),
                span: node.byte_range(),
                node_id: node.id(),
            }),
        }
    }

    fn visit(&mut self, node: Node<'a>, scope: ScopeId) {
        let kind = node.kind();

        match kind {
            "identifier" => {
                if !self.declared_nodes.contains_key(&node.id()) {
                    self.resolve_use(node, scope, false);
                }
                return;
            }
            "shorthand_property_identifier" => {
                self.resolve_use(node, scope, true);
                return;
            }
            // Pattern shorthands are consumed by `declare_pattern`.
            "shorthand_property_identifier_pattern" => return,
            // Member properties, object keys, labels, and type names are not
            // variable references.
            "property_identifier" | "statement_identifier" | "type_identifier" => return,
            _ => {}
        }

        // Declarations bind before their subtrees are walked, so an
        // initializer can reference the name it is being assigned to.
        match kind {
            "function_declaration" | "generator_function_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.declare(name, scope, BindingKind::Function, false);
                }
            }
            "class_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.declare(name, scope, BindingKind::Variable, false);
                }
            }
            "variable_declarator" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.declare_pattern(name, scope, BindingKind::Variable);
                }
            }
            "import_statement" => self.declare_import(node, scope),
            _ => {}
        }

        let child_scope = if is_scope_node(kind) {
            let inner = self.push_scope(Some(scope));
            if is_function_node(kind) {
                // A named function expression can call itself by name.
                if matches!(kind, "function_expression" | "generator_function") {
                    if let Some(name) = node.child_by_field_name("name") {
                        self.declare(name, inner, BindingKind::Function, false);
                    }
                }
                self.declare_parameters(node, inner);
            }
            if kind == "catch_clause" {
                if let Some(param) = node.child_by_field_name("parameter") {
                    self.declare_pattern(param, inner, BindingKind::Parameter);
                }
            }
            // `for (const item of items)` binds its pattern directly on the
            // loop node; without a `kind` child it re-assigns an outer name.
            if kind == "for_in_statement" && node.child_by_field_name("kind").is_some() {
                if let Some(left) = node.child_by_field_name("left") {
                    self.declare_pattern(left, inner, BindingKind::Variable);
                }
            }
            inner
        } else {
            scope
        };

        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        for child in children {
            self.visit(child, child_scope);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(text: &str) -> (SourceFile, ScopeIndex) {
        let source = SourceFile::parse("test.tsx", text).expect("parse failed");
        let scopes = ScopeIndex::build(&source);
        (source, scopes)
    }

    fn binding_named(scopes: &ScopeIndex, name: &str) -> BindingId {
        scopes
            .bindings()
            .find(|(_, b)| b.name == name)
            .map(|(id, _)| id)
            .unwrap_or_else(|| panic!("no binding named {name}"))
    }

    #[test]
    fn resolves_simple_variable_use() {
        let (_, scopes) = index("const total = 1;\nconsole.log(total);\n");
        let id = binding_named(&scopes, "total");
        assert_eq!(scopes.binding(id).kind, BindingKind::Variable);
        assert_eq!(scopes.references(id).len(), 1);
    }

    #[test]
    fn references_are_in_source_order() {
        let (source, scopes) = index("let n = 0;\nn += 1;\nn += 2;\n");
        let id = binding_named(&scopes, "n");
        let refs = scopes.references(id);
        assert_eq!(refs.len(), 2);
        assert!(refs[0].span.start < refs[1].span.start);
        assert_eq!(source.span_text(&refs[0].span), "n");
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let (source, scopes) = index(
            "const x = 1;\nfunction f() {\n  const x = 2;\n  return x;\n}\nconst y = x;\n",
        );
        let ids: Vec<BindingId> = scopes
            .bindings()
            .filter(|(_, b)| b.name == "x")
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids.len(), 2);
        let (outer, inner) = if scopes.binding(ids[0]).span.start < scopes.binding(ids[1]).span.start
        {
            (ids[0], ids[1])
        } else {
            (ids[1], ids[0])
        };
        // `return x` resolves to the inner x, `const y = x` to the outer.
        assert_eq!(scopes.references(inner).len(), 1);
        assert_eq!(scopes.references(outer).len(), 1);
        let outer_ref = &scopes.references(outer)[0];
        assert!(source.text()[..outer_ref.span.start].contains("const y"));
    }

    #[test]
    fn parameters_resolve_in_body() {
        let (_, scopes) = index("const add = (left: number, right: number) => left + right;\n");
        let left = binding_named(&scopes, "left");
        assert_eq!(scopes.binding(left).kind, BindingKind::Parameter);
        assert_eq!(scopes.references(left).len(), 1);
    }

    #[test]
    fn shorthand_destructuring_marks_both_sides() {
        let (_, scopes) = index("const fn = ({ copied }) => console.log(copied);\n");
        let id = binding_named(&scopes, "copied");
        let binding = scopes.binding(id);
        assert_eq!(binding.kind, BindingKind::Destructured);
        assert!(binding.shorthand);
        let refs = scopes.references(id);
        assert_eq!(refs.len(), 1);
        assert!(!refs[0].shorthand);
    }

    #[test]
    fn shorthand_object_use_is_flagged() {
        let (_, scopes) = index("const copied = true;\nconst state = { copied };\n");
        let id = binding_named(&scopes, "copied");
        let refs = scopes.references(id);
        assert_eq!(refs.len(), 1);
        assert!(refs[0].shorthand);
    }

    #[test]
    fn aliased_destructuring_binds_the_alias() {
        let (_, scopes) = index("const { value: current } = box;\nuse(current);\n");
        let id = binding_named(&scopes, "current");
        assert_eq!(scopes.binding(id).kind, BindingKind::Destructured);
        assert!(!scopes.binding(id).shorthand);
        assert_eq!(scopes.references(id).len(), 1);
        // The pattern key `value` must not become a binding.
        assert!(scopes.bindings().all(|(_, b)| b.name != "value"));
    }

    #[test]
    fn unresolved_names_are_free() {
        let (_, scopes) = index("console.log(window);\n");
        let free: Vec<&str> = scopes.free_references().iter().map(|f| f.name.as_str()).collect();
        assert!(free.contains(&"console"));
        assert!(free.contains(&"window"));
    }

    #[test]
    fn import_alias_binds_alias_not_name() {
        let (_, scopes) = index("import { useState as useLocal } from 'react';\nuseLocal();\n");
        let id = binding_named(&scopes, "useLocal");
        assert_eq!(scopes.binding(id).kind, BindingKind::Import);
        assert_eq!(scopes.references(id).len(), 1);
        assert!(scopes.bindings().all(|(_, b)| b.name != "useState"));
    }

    #[test]
    fn default_import_binds() {
        let (_, scopes) = index("import React from 'react';\nReact.render();\n");
        let id = binding_named(&scopes, "React");
        assert_eq!(scopes.binding(id).kind, BindingKind::Import);
        assert_eq!(scopes.references(id).len(), 1);
    }

    #[test]
    fn function_declaration_binds_in_outer_scope() {
        let (_, scopes) = index("function greet() {}\ngreet();\n");
        let id = binding_named(&scopes, "greet");
        assert_eq!(scopes.binding(id).kind, BindingKind::Function);
        assert_eq!(scopes.references(id).len(), 1);
    }

    #[test]
    fn jsx_component_use_is_a_reference() {
        let (_, scopes) = index("const Panel = () => <div />;\nconst App = () => <Panel />;\n");
        let id = binding_named(&scopes, "Panel");
        assert_eq!(scopes.references(id).len(), 1);
    }

    #[test]
    fn use_before_declaration_stays_free() {
        let (_, scopes) = index("run();\nfunction run() {}\n");
        let id = binding_named(&scopes, "run");
        assert!(scopes.references(id).is_empty());
        assert!(scopes.free_references().iter().any(|f| f.name == "run"));
    }

    #[test]
    fn for_of_loop_variable_binds_in_loop_scope() {
        let (_, scopes) = index("for (const item of items) {\n  render(item);\n}\n");
        let id = binding_named(&scopes, "item");
        assert_eq!(scopes.binding(id).kind, BindingKind::Variable);
        assert_eq!(scopes.references(id).len(), 1);
    }

    #[test]
    fn resolve_node_maps_declarations_and_uses() {
        let (_, scopes) = index("const flag = true;\nif (flag) {}\n");
        let id = binding_named(&scopes, "flag");
        assert_eq!(scopes.resolve_node(scopes.binding(id).node_id), Some(id));
        let use_node = scopes.references(id)[0].node_id;
        assert_eq!(scopes.resolve_node(use_node), Some(id));
    }

    #[test]
    fn catch_parameter_scopes_to_handler() {
        let (_, scopes) = index("try { work(); } catch (err) { report(err); }\n");
        let id = binding_named(&scopes, "err");
        assert_eq!(scopes.binding(id).kind, BindingKind::Parameter);
        assert_eq!(scopes.references(id).len(), 1);
    }

    #[test]
    fn default_values_in_patterns_are_references() {
        let (_, scopes) = index("const fallback = 0;\nconst fn = ({ n = fallback }) => n;\n");
        let id = binding_named(&scopes, "fallback");
        assert_eq!(scopes.references(id).len(), 1);
        let n = binding_named(&scopes, "n");
        assert!(scopes.binding(n).shorthand);
    }
}
