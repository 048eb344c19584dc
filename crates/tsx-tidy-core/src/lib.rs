//! # tsx-tidy-core
//!
//! Core framework for tsx-tidy: findings, fixes, the check trait, and the
//! driver that iterates parse → check → fix to a fixpoint.
//!
//! ## Architecture
//!
//! - [`Check`] is the extension seam: a check registers the node kinds it
//!   cares about, and the driver dispatches matching nodes during one
//!   traversal per iteration.
//! - [`Finding`]s carry an optional [`FixRequest`]; the fix synthesizer in
//!   [`fixer`] expands requests into concrete non-overlapping [`Fix`]es
//!   (rename requests expand to the binding's whole reference set).
//! - [`Driver`] orchestrates: it re-parses and re-indexes after every apply
//!   step, so later iterations always see fresh offsets, and stops at a
//!   fixpoint or a configured iteration cap.
//! - Collaborator traits in [`collab`] keep folder-listing and
//!   utility-class-ordering policy out of the checks themselves.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod check;
pub mod collab;
pub mod config;
pub mod context;
pub mod driver;
pub mod fixer;
pub mod types;

pub use check::{Check, CheckBox, OptionSpec};
pub use collab::{ClassOrder, DefaultClassOrder, DirEntryInfo, DirLister, FsDirLister, UNCLASSIFIED};
pub use config::{CheckConfig, Config, ConfigError, DriverConfig};
pub use context::CheckContext;
pub use driver::{Driver, DriverBuilder, DriverError, RunOutcome};
pub use fixer::{apply_edits, plan_pass, synthesize};
pub use types::{
    Finding, FindingDiagnostic, Fix, FixRequest, Location, RunReport, Severity, TextEdit,
};
