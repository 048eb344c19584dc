//! # tsx-tidy-conventions
//!
//! Pure naming-convention machinery for tsx-tidy:
//!
//! - [`case`] classifies identifiers into case families and converts between
//!   them deterministically.
//! - [`naming`] derives expected names from file paths and synthesizes
//!   corrected boolean/callback names.
//!
//! Every function here is pure, total, and string/path-only: no semantic
//! program knowledge, no I/O. Folder heuristics (singularization,
//! grouping-folder elision) are literal table lookups, not a morphological
//! analyzer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod case;
pub mod naming;

pub use case::{classify, to_camel, to_pascal, to_upper_snake, CaseFamily};
pub use naming::{boolean_name, callback_name, derive_expected_name, singularize, NameKind};
