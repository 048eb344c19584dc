//! Case-family classification and deterministic case conversion.

use once_cell::sync::Lazy;
use regex::Regex;

/// Case families an identifier can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseFamily {
    /// `userName`
    Camel,
    /// `UserName`
    Pascal,
    /// `USER_NAME`
    UpperSnake,
    /// `user_name`
    Snake,
    /// `user-name`
    Kebab,
    /// Anything else (mixed separators, leading digits, ...).
    Unknown,
}

static UPPER_SNAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").expect("static regex"));
static SNAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:_[a-z0-9]+)+$").expect("static regex"));
static KEBAB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:-[a-z0-9]+)+$").expect("static regex"));
static PASCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("static regex"));
static CAMEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("static regex"));

/// Classifies an identifier into its case family.
///
/// Predicates run in order, most specific first; `UPPER_SNAKE` is checked
/// before `snake` so `MAX` does not classify as a lowercase form.
#[must_use]
pub fn classify(ident: &str) -> CaseFamily {
    if UPPER_SNAKE.is_match(ident) {
        CaseFamily::UpperSnake
    } else if SNAKE.is_match(ident) {
        CaseFamily::Snake
    } else if KEBAB.is_match(ident) {
        CaseFamily::Kebab
    } else if PASCAL.is_match(ident) {
        CaseFamily::Pascal
    } else if CAMEL.is_match(ident) {
        CaseFamily::Camel
    } else {
        CaseFamily::Unknown
    }
}

/// Splits an identifier into lowercase words.
///
/// Boundaries are `_`/`-` separators and case transitions, including acronym
/// boundaries: `ABCWord` splits as `abc`, `word`.
fn words(ident: &str) -> Vec<String> {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            continue;
        }

        let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
        let next = chars.get(i + 1).copied();
        let boundary = match prev {
            Some(p) if c.is_ascii_uppercase() => {
                p.is_ascii_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase()))
            }
            _ => false,
        };

        if boundary && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts any recognized identifier shape to camelCase.
#[must_use]
pub fn to_camel(ident: &str) -> String {
    let words = words(ident);
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(w);
        } else {
            out.push_str(&capitalize(w));
        }
    }
    out
}

/// Converts any recognized identifier shape to PascalCase.
#[must_use]
pub fn to_pascal(ident: &str) -> String {
    words(ident).iter().map(|w| capitalize(w)).collect()
}

/// Converts any recognized identifier shape to UPPER_SNAKE_CASE.
///
/// Idempotent: `to_upper_snake(to_upper_snake(x)) == to_upper_snake(x)`.
#[must_use]
pub fn to_upper_snake(ident: &str) -> String {
    words(ident)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}
