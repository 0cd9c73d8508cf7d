//! Free-text sanitization.

/// Collapses whitespace runs to a single space, strips control characters,
/// and trims the ends.
pub fn sanitize_text(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter_map(|ch| {
            if ch.is_whitespace() {
                Some(' ')
            } else if ch.is_control() {
                None
            } else {
                Some(ch)
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitized text, or `None` when nothing is left.
pub fn sanitize_optional(value: &str) -> Option<String> {
    let cleaned = sanitize_text(value);
    if cleaned.is_empty() { None } else { Some(cleaned) }
}
