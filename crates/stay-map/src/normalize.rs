//! Header and free-text normalization used for alias comparison.

use unicode_normalization::UnicodeNormalization;

/// Normalizes a header (or alias) into a comparable key.
///
/// The result is lowercase ASCII: accents are folded onto their base letter,
/// other non-ASCII symbols are dropped, and every run of ASCII punctuation or
/// whitespace becomes a single `_`. Leading and trailing separators are
/// removed, so `"  Nº Doc. "` becomes `"no_doc"` and `"N° Doc."` becomes
/// `"n_doc"`. The function is idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.to_lowercase().nfkd() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii() {
            pending_separator = true;
        }
    }

    out
}

/// True when a normalized header is purely numeric (an index column).
pub fn is_numeric_key(normalized: &str) -> bool {
    !normalized.is_empty()
        && normalized
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch == '_')
}
