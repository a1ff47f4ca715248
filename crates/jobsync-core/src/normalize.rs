//! Matching keys for company names and job descriptions.
//!
//! Everything here is pure: the output only ever feeds comparisons and is
//! never written back onto a stored listing.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid html tag regex"));

/// Long legal-suffix spellings folded onto the short form.
const LEGAL_SUFFIXES: &[(&str, &str)] = &[
    ("incorporated", "inc"),
    ("corporation", "corp"),
    ("company", "co"),
    ("limited", "ltd"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The text went through a lossy decode upstream and cannot be trusted
    /// for term matching.
    #[error("description contains undecodable text at byte {position}")]
    Encoding { position: usize },
}

/// Collapses textual variants of a company name onto a single key.
///
/// Lowercases, drops punctuation (`-`, `/` and `_` separate words, `&`
/// reads as `and`), folds long legal suffixes onto their abbreviation and
/// collapses whitespace. `"Acme, Inc."`, `"ACME INC"` and
/// `"Acme Incorporated"` all produce `"acme inc"`.
#[must_use]
pub fn normalize_company_name(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.to_lowercase().chars() {
        match c {
            '&' => cleaned.push_str(" and "),
            '-' | '/' | '_' => cleaned.push(' '),
            c if c.is_alphanumeric() || c.is_whitespace() => cleaned.push(c),
            _ => {}
        }
    }

    cleaned
        .split_whitespace()
        .map(|word| {
            LEGAL_SUFFIXES
                .iter()
                .find(|(long, _)| *long == word)
                .map_or(word, |(_, short)| short)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduces a job description to the lowercase, single-spaced text that
/// taxonomy terms are searched in.
///
/// Markup (bold tags included) becomes a space, `", "` and `". "`
/// separators become a space, and whitespace runs collapse.
///
/// # Errors
///
/// Returns [`NormalizeError::Encoding`] if the text contains the Unicode
/// replacement character.
pub fn normalize_description(raw: &str) -> Result<String, NormalizeError> {
    if let Some(position) = raw.find('\u{FFFD}') {
        return Err(NormalizeError::Encoding { position });
    }

    let without_tags = HTML_TAG.replace_all(raw, " ");
    let without_separators = without_tags.replace(", ", " ").replace(". ", " ");

    Ok(without_separators
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase())
}
