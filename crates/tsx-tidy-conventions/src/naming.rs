//! Path-driven name derivation and boolean/callback name synthesis.

use std::path::Path;

use crate::case::{to_camel, to_pascal};

/// What kind of declaration a derived name is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// A JSX component; PascalCase unless the folder table says otherwise.
    Component,
    /// A hook; camelCase with a `use` prefix.
    Hook,
    /// Any other module-level export; styled entirely by the folder table.
    Module,
}

/// Folder names elided from the derivation chain.
const GROUPING_FOLDERS: &[&str] = &["shared", "common", "ui", "base", "core", "general", "elements"];

/// Folder names that terminate the walk without decorating the name.
const ROOT_MARKERS: &[&str] = &["src", "app", "source"];

enum Decoration {
    None,
    Suffix(&'static str),
    Prefix(&'static str),
}

enum Style {
    Pascal,
    Camel,
}

/// Folder → decoration/style table. A table hit terminates the walk.
fn folder_entry(folder: &str) -> Option<(Decoration, Style)> {
    match folder {
        "components" | "widgets" => Some((Decoration::None, Style::Pascal)),
        "layouts" => Some((Decoration::Suffix("Layout"), Style::Pascal)),
        "pages" => Some((Decoration::Suffix("Page"), Style::Pascal)),
        "modals" => Some((Decoration::Suffix("Modal"), Style::Pascal)),
        "providers" => Some((Decoration::Suffix("Provider"), Style::Pascal)),
        "icons" => Some((Decoration::Suffix("Icon"), Style::Pascal)),
        "hooks" => Some((Decoration::Prefix("use"), Style::Camel)),
        // Data-like folders: camelCase, no decoration.
        "utils" | "helpers" | "constants" | "services" => Some((Decoration::None, Style::Camel)),
        _ => None,
    }
}

/// Singularizes a plural folder name by literal suffix rules.
///
/// `ies → y`; `xes`/`zes`/`ses` drop two characters; a trailing `s` (but not
/// `ss`) drops one. Everything else passes through.
#[must_use]
pub fn singularize(folder: &str) -> String {
    if let Some(stem) = folder.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if folder.ends_with("xes") || folder.ends_with("zes") || folder.ends_with("ses") {
        return folder[..folder.len() - 2].to_owned();
    }
    if folder.ends_with('s') && !folder.ends_with("ss") {
        return folder[..folder.len() - 1].to_owned();
    }
    folder.to_owned()
}

/// Derives the expected identifier for a file from its path.
///
/// Walks path segments from the file toward a root marker: the file stem
/// contributes first (index files contribute nothing), then each folder
/// innermost-to-outermost. Grouping folders are elided, plural folders
/// singularized, and a folder-table hit terminates the walk and decorates
/// the result (`layouts → Layout` suffix, `hooks → use` prefix).
///
/// Pure function of `(path, kind)`: identical input always yields identical
/// output. Returns `None` for paths with no usable segments.
#[must_use]
pub fn derive_expected_name(path: &Path, kind: NameKind) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;

    let mut segments: Vec<String> = Vec::new();
    if stem != "index" {
        segments.push(stem.to_owned());
    }

    let mut decoration = Decoration::None;
    let mut style = match kind {
        NameKind::Hook => Style::Camel,
        NameKind::Component | NameKind::Module => Style::Pascal,
    };

    for ancestor in path.ancestors().skip(1) {
        let Some(folder) = ancestor.file_name().and_then(|n| n.to_str()) else {
            break;
        };
        if ROOT_MARKERS.contains(&folder) {
            break;
        }
        if let Some((deco, folder_style)) = folder_entry(folder) {
            decoration = deco;
            if !matches!(kind, NameKind::Hook) {
                style = folder_style;
            }
            break;
        }
        if GROUPING_FOLDERS.contains(&folder) {
            continue;
        }
        segments.push(singularize(folder));
    }

    if segments.is_empty() {
        return None;
    }

    let mut name = match style {
        Style::Pascal => segments.iter().map(|s| to_pascal(s)).collect::<String>(),
        Style::Camel => {
            let mut joined = to_camel(&segments[0]);
            for s in &segments[1..] {
                joined.push_str(&to_pascal(s));
            }
            joined
        }
    };

    match decoration {
        Decoration::None => {}
        Decoration::Suffix(suffix) => {
            if !name.ends_with(suffix) {
                name.push_str(suffix);
            }
        }
        Decoration::Prefix(prefix) => {
            if !has_prefix_word(&name, prefix) {
                name = format!("{prefix}{}", to_pascal(&name));
            }
        }
    }

    if matches!(kind, NameKind::Hook) && !has_prefix_word(&name, "use") {
        name = format!("use{}", to_pascal(&name));
    }

    Some(name)
}

/// Keywords that select `has` over `is` when embedded in a name.
const HAS_KEYWORDS: &[&str] = &[
    "content",
    "data",
    "error",
    "item",
    "items",
    "permission",
    "value",
    "result",
    "access",
    "option",
    "options",
];

/// Prefixes that already mark a name as boolean.
const BOOLEAN_PREFIXES: &[&str] = &["is", "has", "should", "can"];

/// Synthesizes a boolean-shaped name from an identifier.
///
/// Names already carrying a boolean prefix pass through unchanged. `has` is
/// chosen when a denylist keyword is embedded in the name, otherwise `is`.
#[must_use]
pub fn boolean_name(ident: &str) -> String {
    for prefix in BOOLEAN_PREFIXES {
        if has_prefix_word(ident, prefix) {
            return ident.to_owned();
        }
    }
    let lowered = ident.to_lowercase();
    let prefix = if HAS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        "has"
    } else {
        "is"
    };
    format!("{prefix}{}", to_pascal(ident))
}

/// Synthesizes an `on`-prefixed callback name from a handler-style name.
///
/// Strips a leading `handle` or trailing `Handler` before prefixing `on`;
/// names already `on`-prefixed pass through unchanged.
#[must_use]
pub fn callback_name(ident: &str) -> String {
    if has_prefix_word(ident, "on") {
        return ident.to_owned();
    }
    let stripped = ident
        .strip_prefix("handle")
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_uppercase))
        .or_else(|| ident.strip_suffix("Handler"))
        .unwrap_or(ident);
    if stripped.is_empty() {
        return format!("on{}", to_pascal(ident));
    }
    format!("on{}", to_pascal(stripped))
}

/// True when `ident` starts with `prefix` as a whole camel-case word
/// (`isOpen` has prefix `is`; `island` does not).
fn has_prefix_word(ident: &str, prefix: &str) -> bool {
    match ident.strip_prefix(prefix) {
        Some(rest) => rest.starts_with(char::is_uppercase),
        None => false,
    }
}
