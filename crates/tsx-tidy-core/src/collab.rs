//! External collaborator contracts: directory listing and utility-class
//! ordering.
//!
//! Both are consumed through narrow traits so checks stay decoupled from
//! the policy behind them. The directory collaborator never fails: an
//! unreadable path yields "no opinion" (an empty listing). The class-order
//! collaborator owns the ordering policy; checks only call it.

use std::path::Path;

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// File or directory name, without the parent path.
    pub name: String,
    /// True for directories.
    pub is_dir: bool,
}

/// Bounded synchronous listing of a directory's immediate children.
pub trait DirLister: Send + Sync {
    /// Lists immediate children of `path`.
    ///
    /// Missing or unreadable directories degrade to an empty result,
    /// never an error.
    fn list(&self, path: &Path) -> Vec<DirEntryInfo>;
}

/// [`DirLister`] backed by the real filesystem.
#[derive(Debug, Default)]
pub struct FsDirLister;

impl DirLister for FsDirLister {
    fn list(&self, path: &Path) -> Vec<DirEntryInfo> {
        let Ok(entries) = std::fs::read_dir(path) else {
            return Vec::new();
        };
        let mut out: Vec<DirEntryInfo> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_owned();
                let is_dir = entry.file_type().ok()?.is_dir();
                Some(DirEntryInfo { name, is_dir })
            })
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

/// Ordinal returned by [`ClassOrder::classify`] for unrecognized tokens.
pub const UNCLASSIFIED: usize = usize::MAX;

/// Utility-class ordering collaborator.
///
/// Multiline/ordering checks call this contract but do not implement the
/// ordering policy themselves.
pub trait ClassOrder: Send + Sync {
    /// Category ordinal of one utility token; lower sorts earlier.
    /// Unrecognized tokens return [`UNCLASSIFIED`].
    fn classify(&self, token: &str) -> usize;

    /// Whether a string looks like a utility-class list worth ordering.
    fn looks_like_utility_list(&self, text: &str) -> bool;

    /// Reorders a utility-class list; idempotent and whitespace-normalizing.
    fn sort(&self, text: &str) -> String;
}

/// Category prefixes, one row per ordinal, checked in order.
const CATEGORY_PREFIXES: &[&[&str]] = &[
    // layout
    &["flex", "grid", "block", "inline", "hidden", "container", "table"],
    // positioning
    &["static", "fixed", "absolute", "relative", "sticky", "top-", "left-", "right-", "bottom-", "z-"],
    // spacing
    &["m-", "mx-", "my-", "mt-", "mb-", "ml-", "mr-", "p-", "px-", "py-", "pt-", "pb-", "pl-", "pr-", "gap-", "space-"],
    // sizing
    &["w-", "h-", "min-w-", "min-h-", "max-w-", "max-h-", "size-"],
    // typography
    &["text-", "font-", "leading-", "tracking-", "uppercase", "lowercase", "capitalize", "truncate", "italic"],
    // background
    &["bg-"],
    // borders
    &["border", "rounded", "ring-", "outline-", "divide-"],
    // effects
    &["shadow", "opacity-", "blur-", "transition", "duration-", "ease-"],
    // interactivity
    &["cursor-", "select-", "pointer-events-", "overflow-"],
];

/// Deterministic reference implementation of [`ClassOrder`].
///
/// Groups tokens by category ordinal with a stable sort, preserving the
/// original relative order inside a category.
#[derive(Debug, Default)]
pub struct DefaultClassOrder;

impl DefaultClassOrder {
    /// Creates the reference class orderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ClassOrder for DefaultClassOrder {
    fn classify(&self, token: &str) -> usize {
        // Variant prefixes like `hover:` classify by their base token.
        let base = token.rsplit(':').next().unwrap_or(token);
        for (ordinal, prefixes) in CATEGORY_PREFIXES.iter().enumerate() {
            if prefixes.iter().any(|p| {
                if p.ends_with('-') {
                    base.starts_with(p)
                } else {
                    base == *p || base.starts_with(&format!("{p}-"))
                }
            }) {
                return ordinal;
            }
        }
        UNCLASSIFIED
    }

    fn looks_like_utility_list(&self, text: &str) -> bool {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < 2 {
            return false;
        }
        let well_formed = tokens.iter().all(|t| {
            t.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-:/[].%".contains(c))
        });
        well_formed && tokens.iter().any(|t| self.classify(t) != UNCLASSIFIED)
    }

    fn sort(&self, text: &str) -> String {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.sort_by_key(|t| self.classify(t));
        tokens.join(" ")
    }
}
