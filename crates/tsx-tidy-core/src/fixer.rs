//! Fix synthesis: expanding fix requests into concrete, conflict-free edits.
//!
//! Checks attach [`FixRequest`]s to findings; this module turns them into
//! [`Fix`]es against the current iteration's source text and scope index. A
//! rename request expands into edits at the declaration and every resolved
//! use site, as one atomic set. Conflict resolution between fixes happens at
//! fix granularity: a fix that overlaps an already-accepted one is dropped
//! whole and the finding resurfaces on the next iteration against fresh
//! offsets.

use std::collections::BTreeSet;
use std::ops::Range;

use tsx_tidy_syntax::{ScopeIndex, SourceFile};

use crate::types::{Finding, Fix, FixRequest, TextEdit};

/// Expands one finding's fix request into a concrete [`Fix`].
///
/// Returns `None` when the finding carries no request, or when the expanded
/// edit set is internally inconsistent (overlapping edits).
#[must_use]
pub fn synthesize(finding: &Finding, source: &SourceFile, scopes: &ScopeIndex) -> Option<Fix> {
    match finding.repair.as_ref()? {
        FixRequest::Edits(edits) => Fix::from_edits(edits.clone()),
        FixRequest::RenameBinding {
            node_id,
            span,
            new_name,
        } => synthesize_rename(*node_id, span, new_name, source, scopes),
    }
}

/// Expands a rename request into declaration + reference edits.
///
/// When the anchor node resolves to no binding (free name, or an anchor the
/// index never saw), the rename degrades to a single edit at the anchor span
/// rather than guessing at other occurrences.
fn synthesize_rename(
    node_id: usize,
    span: &Range<usize>,
    new_name: &str,
    source: &SourceFile,
    scopes: &ScopeIndex,
) -> Option<Fix> {
    let Some(binding_id) = scopes.resolve_node(node_id) else {
        tracing::debug!(
            new_name,
            offset = span.start,
            "rename anchor is unresolved, degrading to single-site edit"
        );
        return Fix::from_edits(vec![TextEdit::new(span.clone(), new_name)]);
    };

    let binding = scopes.binding(binding_id);
    let mut emitted: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut edits = Vec::new();

    let mut push_site = |span: &Range<usize>, shorthand: bool, edits: &mut Vec<TextEdit>| {
        if !emitted.insert((span.start, span.end)) {
            return;
        }
        let replacement = if shorthand {
            // `{ name }` must become `{ name: newName }` to keep the object
            // key stable while renaming the variable.
            format!("{}: {}", source.span_text(span), new_name)
        } else {
            new_name.to_owned()
        };
        edits.push(TextEdit::new(span.clone(), replacement));
    };

    push_site(&binding.span, binding.shorthand, &mut edits);
    for reference in scopes.references(binding_id) {
        push_site(&reference.span, reference.shorthand, &mut edits);
    }

    Fix::from_edits(edits)
}

/// Plans one apply step from a pass's findings.
///
/// Fixes are ordered by their first edit offset and admitted first-writer-
/// wins: a fix any of whose edits overlaps an already-admitted edit is
/// rejected whole, so a rename is always applied atomically or not at all.
/// Rejected findings keep their requests and resurface next iteration.
///
/// Returns the admitted edits, sorted by start offset and pairwise disjoint.
#[must_use]
pub fn plan_pass(findings: &[Finding], source: &SourceFile, scopes: &ScopeIndex) -> Vec<TextEdit> {
    let mut fixes: Vec<Fix> = findings
        .iter()
        .filter_map(|f| synthesize(f, source, scopes))
        .filter(|f| !f.edits().is_empty())
        .collect();
    fixes.sort_by_key(Fix::first_offset);

    let mut admitted: Vec<TextEdit> = Vec::new();
    for fix in fixes {
        let conflict = fix
            .edits()
            .iter()
            .any(|e| admitted.iter().any(|a| a.overlaps(&e.range)));
        if conflict {
            tracing::debug!(
                offset = fix.first_offset(),
                "fix overlaps an earlier one, deferring to next iteration"
            );
            continue;
        }
        admitted.extend(fix.edits().iter().cloned());
    }

    admitted.sort_by_key(|e| e.range.start);
    admitted
}

/// Applies disjoint edits to `text`, producing the next iteration's source.
///
/// `edits` must be sorted by start offset and pairwise non-overlapping, as
/// produced by [`plan_pass`].
#[must_use]
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.range.start < cursor || edit.range.end > text.len() {
            // Defensive skip for an out-of-order or out-of-bounds edit.
            tracing::warn!(start = edit.range.start, end = edit.range.end, "skipping invalid edit");
            continue;
        }
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};
    use std::path::PathBuf;
    use tsx_tidy_syntax::ScopeIndex;

    fn parse(text: &str) -> (SourceFile, ScopeIndex) {
        let source = SourceFile::parse("test.tsx", text).expect("parse failed");
        let scopes = ScopeIndex::build(&source);
        (source, scopes)
    }

    fn rename_finding(
        source: &SourceFile,
        scopes: &ScopeIndex,
        old: &str,
        new: &str,
    ) -> Finding {
        let (_, binding) = scopes
            .bindings()
            .find(|(_, b)| b.name == old)
            .unwrap_or_else(|| panic!("no binding {old}"));
        Finding::new(
            "TT001",
            "variable-case",
            Severity::Warning,
            Location::new(PathBuf::from(source.path()), 1, 1)
                .with_span(binding.span.start, binding.span.end - binding.span.start),
            format!("rename {old} to {new}"),
        )
        .with_repair(FixRequest::RenameBinding {
            node_id: binding.node_id,
            span: binding.span.clone(),
            new_name: new.to_owned(),
        })
    }

    #[test]
    fn rename_rewrites_declaration_and_all_uses() {
        let (source, scopes) = parse("const user_name = 'a';\nconsole.log(user_name);\nsend(user_name);\n");
        let finding = rename_finding(&source, &scopes, "user_name", "userName");
        let edits = plan_pass(&[finding], &source, &scopes);
        let fixed = apply_edits(source.text(), &edits);
        assert_eq!(
            fixed,
            "const userName = 'a';\nconsole.log(userName);\nsend(userName);\n"
        );
    }

    #[test]
    fn rename_leaves_shadowing_binding_alone() {
        let (source, scopes) = parse(
            "const flag_set = 1;\nfunction f() {\n  const flag_set = 2;\n  return flag_set;\n}\nuse(flag_set);\n",
        );
        // Rename only the outer binding.
        let (_, outer) = scopes
            .bindings()
            .filter(|(_, b)| b.name == "flag_set")
            .min_by_key(|(_, b)| b.span.start)
            .expect("outer binding");
        let finding = Finding::new(
            "TT001",
            "variable-case",
            Severity::Warning,
            Location::new(PathBuf::from("test.tsx"), 1, 7),
        "rename".to_string(),
        )
        .with_repair(FixRequest::RenameBinding {
            node_id: outer.node_id,
            span: outer.span.clone(),
            new_name: "flagSet".to_owned(),
        });

        let edits = plan_pass(&[finding], &source, &scopes);
        let fixed = apply_edits(source.text(), &edits);
        assert_eq!(
            fixed,
            "const flagSet = 1;\nfunction f() {\n  const flag_set = 2;\n  return flag_set;\n}\nuse(flagSet);\n"
        );
    }

    #[test]
    fn shorthand_sites_expand_to_keyed_pairs() {
        let (source, scopes) = parse("const is_done = true;\nconst state = { is_done };\n");
        let finding = rename_finding(&source, &scopes, "is_done", "isDone");
        let edits = plan_pass(&[finding], &source, &scopes);
        let fixed = apply_edits(source.text(), &edits);
        assert_eq!(fixed, "const isDone = true;\nconst state = { is_done: isDone };\n");
    }

    #[test]
    fn shorthand_declaration_expands_in_pattern() {
        let (source, scopes) = parse("const fn = ({ user_id }) => log(user_id);\n");
        let finding = rename_finding(&source, &scopes, "user_id", "userId");
        let edits = plan_pass(&[finding], &source, &scopes);
        let fixed = apply_edits(source.text(), &edits);
        assert_eq!(fixed, "const fn = ({ user_id: userId }) => log(userId);\n");
    }

    #[test]
    fn shorthand_parameter_takes_boolean_prefix_as_keyed_pair() {
        let (source, scopes) = parse("const show = ({ copied }) => log(copied);\n");
        let finding = rename_finding(&source, &scopes, "copied", "isCopied");
        let edits = plan_pass(&[finding], &source, &scopes);
        let fixed = apply_edits(source.text(), &edits);
        assert_eq!(fixed, "const show = ({ copied: isCopied }) => log(isCopied);\n");
    }

    #[test]
    fn unresolved_anchor_degrades_to_single_site() {
        let (source, scopes) = parse("const a = 1;\n");
        let finding = Finding::new(
            "TT003",
            "callback-prop-name",
            Severity::Warning,
            Location::new(PathBuf::from("test.tsx"), 1, 7),
            "rename".to_string(),
        )
        .with_repair(FixRequest::RenameBinding {
            node_id: usize::MAX,
            span: 6..7,
            new_name: "b".to_owned(),
        });
        let fix = synthesize(&finding, &source, &scopes).expect("fix");
        assert_eq!(fix.edits().len(), 1);
        assert_eq!(fix.edits()[0].range, 6..7);
    }

    #[test]
    fn overlapping_fix_is_dropped_whole() {
        let (source, scopes) = parse("const ab_cd = 1;\nuse(ab_cd);\n");
        let first = rename_finding(&source, &scopes, "ab_cd", "abCd");
        // A competing direct edit over the same declaration span.
        let (_, binding) = scopes
            .bindings()
            .find(|(_, b)| b.name == "ab_cd")
            .expect("binding");
        let second = Finding::new(
            "TT002",
            "boolean-naming",
            Severity::Warning,
            Location::new(PathBuf::from("test.tsx"), 1, 7),
            "competing".to_string(),
        )
        .with_repair(FixRequest::Edits(vec![TextEdit::new(
            binding.span.clone(),
            "isAbCd",
        )]));

        let edits = plan_pass(&[first, second], &source, &scopes);
        let fixed = apply_edits(source.text(), &edits);
        // Only the earlier-starting fix lands; both start at the same offset
        // so whichever sorts first wins, and the result is consistent.
        assert!(fixed == "const abCd = 1;\nuse(abCd);\n" || fixed == "const isAbCd = 1;\nuse(ab_cd);\n");
        // Never a mix of the two.
        assert!(!fixed.contains("isAbCd") || !fixed.contains("abCd"));
    }

    #[test]
    fn disjoint_fixes_apply_together() {
        let (source, scopes) = parse("const a_b = 1;\nconst c_d = 2;\n");
        let first = rename_finding(&source, &scopes, "a_b", "aB");
        let second = rename_finding(&source, &scopes, "c_d", "cD");
        let edits = plan_pass(&[first, second], &source, &scopes);
        let fixed = apply_edits(source.text(), &edits);
        assert_eq!(fixed, "const aB = 1;\nconst cD = 2;\n");
    }

    #[test]
    fn apply_edits_handles_empty_set() {
        assert_eq!(apply_edits("const a = 1;", &[]), "const a = 1;");
    }
}
