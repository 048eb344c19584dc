//! # tsx-tidy-syntax
//!
//! Tree-sitter based source model and scope index for JSX/TSX files.
//!
//! This crate owns the per-file parsing layer of tsx-tidy:
//!
//! - [`SourceFile`] wraps one file's raw text and parsed tree and exposes
//!   byte-offset/line/column navigation.
//! - [`ScopeIndex`] maps lexical scopes to declared bindings and, per
//!   binding, its ordered reference sites. It is built once per driver
//!   iteration with a single depth-first walk and never mutated afterwards.
//!
//! The tree/token parser itself is Tree-sitter; this crate only consumes
//! the parsed tree.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scope;
pub mod source;

pub use scope::{Binding, BindingId, BindingKind, FreeReference, Reference, ScopeId, ScopeIndex};
pub use source::{ParseError, SourceFile};

/// Re-export of the Tree-sitter node type used throughout the crate.
pub use tree_sitter::Node;
