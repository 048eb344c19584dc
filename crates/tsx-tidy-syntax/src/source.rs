//! Per-file source model: raw text, parsed tree, and offset navigation.

use std::ops::Range;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

/// Errors raised while turning raw text into a [`SourceFile`].
///
/// A parse failure is fatal for the file it occurred in: the driver reports
/// one file-level error and skips all checks for that file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The Tree-sitter TSX grammar could not be loaded.
    #[error("failed to load TSX grammar: {0}")]
    Language(String),

    /// The parser produced no tree at all.
    #[error("parser produced no tree for {path}")]
    NoTree {
        /// Path of the file that failed.
        path: PathBuf,
    },

    /// The tree contains syntax errors.
    #[error("syntax error in {path} at {line}:{column}")]
    Syntax {
        /// Path of the file that failed.
        path: PathBuf,
        /// 1-indexed line of the first error node.
        line: usize,
        /// 1-indexed column of the first error node.
        column: usize,
    },
}

/// One file's parsed tree, raw text, and offset/line/column navigation.
///
/// The tree is immutable once built; checks receive read-only access.
pub struct SourceFile {
    path: PathBuf,
    text: String,
    tree: Tree,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Parses `text` as TSX and builds the source model.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the grammar cannot be loaded, the parser
    /// yields no tree, or the tree contains syntax errors.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, ParseError> {
        let path = path.into();
        let text = text.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let tree = parser
            .parse(text.as_bytes(), None)
            .ok_or_else(|| ParseError::NoTree { path: path.clone() })?;

        if tree.root_node().has_error() {
            let err = first_error(tree.root_node());
            let pos = err.map_or_else(|| tree.root_node().start_position(), |n| n.start_position());
            return Err(ParseError::Syntax {
                path,
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }

        let line_starts = compute_line_starts(&text);

        Ok(Self {
            path,
            text,
            tree,
            line_starts,
        })
    }

    /// Path of the file this model was parsed from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Root node of the parsed tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    #[must_use]
    pub fn node_text(&self, node: Node<'_>) -> &str {
        &self.text[node.start_byte()..node.end_byte()]
    }

    /// Source text covered by a half-open byte range.
    ///
    /// Out-of-bounds ranges yield an empty string rather than panicking.
    #[must_use]
    pub fn span_text(&self, range: &Range<usize>) -> &str {
        self.text.get(range.clone()).unwrap_or("")
    }

    /// Converts a byte offset to a 1-indexed `(line, column)` pair.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }

    /// Converts a 1-indexed `(line, column)` pair to a byte offset.
    ///
    /// Out-of-bounds positions clamp to the end of the text.
    #[must_use]
    pub fn offset(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }
        match self.line_starts.get(line - 1) {
            Some(start) => (start + column.saturating_sub(1)).min(self.text.len()),
            None => self.text.len(),
        }
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("bytes", &self.text.len())
            .finish_non_exhaustive()
    }
}

/// Byte offsets at which each line begins, line 0 first.
fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    for child in children {
        if let Some(err) = first_error(child) {
            return Some(err);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SourceFile {
        SourceFile::parse("test.tsx", text).expect("parse failed")
    }

    #[test]
    fn parses_simple_component() {
        let src = parse("const App = () => <div>hi</div>;\n");
        assert_eq!(src.root().kind(), "program");
        assert!(src.text().starts_with("const App"));
    }

    #[test]
    fn syntax_error_is_fatal() {
        let err = SourceFile::parse("bad.tsx", "const = = 1;");
        assert!(matches!(err, Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn line_col_round_trip() {
        let src = parse("const a = 1;\nconst b = 2;\n");
        assert_eq!(src.line_col(0), (1, 1));
        assert_eq!(src.line_col(13), (2, 1));
        assert_eq!(src.line_col(19), (2, 7));
        assert_eq!(src.offset(2, 7), 19);
        assert_eq!(src.offset(1, 1), 0);
    }

    #[test]
    fn node_text_slices_source() {
        let src = parse("const answer = 42;\n");
        let decl = src.root().named_child(0).expect("statement");
        assert_eq!(src.node_text(decl), "const answer = 42;");
    }

    #[test]
    fn span_text_tolerates_out_of_bounds() {
        let src = parse("const a = 1;\n");
        assert_eq!(src.span_text(&(0..5)), "const");
        assert_eq!(src.span_text(&(500..600)), "");
    }
}
