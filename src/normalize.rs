//! Canonical text transform shared by every other module.
//!
//! A canonical value is trimmed, lower-cased, has internal whitespace
//! collapsed to single spaces, diacritics removed, and control characters
//! stripped. The transform is idempotent, so values already in canonical form
//! pass through unchanged and alias keys can be normalized at load time and
//! compared with `==` at query time.

use std::sync::OnceLock;

use encoding_rs::UTF_8;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

fn whitespace_run() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern"))
}

/// Returns the canonical form of `input`. Never fails; empty input yields an
/// empty string.
pub fn normalize_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    // NFKD first so diacritics become separate combining marks, then drop the
    // marks. Controls are stripped unless they double as whitespace (tabs,
    // newlines), which the collapse below folds into single spaces.
    let stripped: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    let lowered = stripped.to_lowercase();
    let collapsed = whitespace_run().replace_all(&lowered, " ");
    collapsed.trim().to_string()
}

/// Absent input normalizes to the empty string.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map_or_else(String::new, normalize_text)
}

/// Normalizes raw bytes that may not be valid UTF-8. Undecodable sequences
/// are replaced rather than reported; the result is always a string.
pub fn normalize_bytes(input: &[u8]) -> String {
    let (decoded, _, _) = UTF_8.decode(input);
    normalize_text(&decoded)
}
