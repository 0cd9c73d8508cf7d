//! Identity document cleaning and classification.

/// A cleaned identity document and its inferred kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// 7-8 digits.
    NationalId(String),
    /// 5-15 ASCII letters and digits, uppercased.
    Passport(String),
}

/// Removes separators and the `.0` suffix left by float-typed cells.
///
/// The suffix is removed first, so `"35123456.0"` cleans to `"35123456"`
/// rather than `"351234560"`.
pub fn clean_document(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|ch| !matches!(ch, '.' | '-') && !ch.is_whitespace())
        .collect()
}

fn is_national_id(cleaned: &str) -> bool {
    (7..=8).contains(&cleaned.len()) && cleaned.chars().all(|ch| ch.is_ascii_digit())
}

fn is_passport(cleaned: &str) -> bool {
    (5..=15).contains(&cleaned.len()) && cleaned.chars().all(|ch| ch.is_ascii_alphanumeric())
}

/// Cleans and classifies a document value by shape.
pub fn classify_document(raw: &str) -> Option<Document> {
    let cleaned = clean_document(raw);
    if is_national_id(&cleaned) {
        Some(Document::NationalId(cleaned))
    } else if is_passport(&cleaned) {
        Some(Document::Passport(cleaned.to_ascii_uppercase()))
    } else {
        None
    }
}

/// Cleans a value from a dedicated passport column: spaces removed,
/// uppercased, accepted when it has passport shape.
pub fn clean_passport(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    is_passport(&cleaned).then_some(cleaned)
}

/// Returns the value as a national id when it cleans to 7-8 digits.
pub fn national_id_token(raw: &str) -> Option<String> {
    let cleaned = clean_document(raw);
    is_national_id(&cleaned).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_national_id() {
        assert_eq!(
            classify_document("35.123.456"),
            Some(Document::NationalId("35123456".to_string()))
        );
        assert_eq!(
            classify_document(" 7-123-456 "),
            Some(Document::NationalId("7123456".to_string()))
        );
    }

    #[test]
    fn float_artifact_is_removed_before_dots() {
        assert_eq!(clean_document("35123456.0"), "35123456");
        assert_eq!(
            classify_document("35123456.0"),
            Some(Document::NationalId("35123456".to_string()))
        );
    }

    #[test]
    fn alphanumeric_becomes_uppercase_passport() {
        assert_eq!(
            classify_document("aa1234567"),
            Some(Document::Passport("AA1234567".to_string()))
        );
        // Too long for a national id, still passport-shaped.
        assert_eq!(
            classify_document("123456789"),
            Some(Document::Passport("123456789".to_string()))
        );
    }

    #[test]
    fn unusable_values() {
        assert_eq!(classify_document(""), None);
        assert_eq!(classify_document("1234"), None);
        assert_eq!(classify_document("AB/123456"), None);
        assert_eq!(classify_document("ñandú12345"), None);
    }

    #[test]
    fn passport_column_values() {
        assert_eq!(clean_passport(" ab 12345 "), Some("AB12345".to_string()));
        assert_eq!(clean_passport("AB-12345"), None);
    }

    #[test]
    fn national_id_tokens_only_match_digits() {
        assert_eq!(national_id_token("30.111.222"), Some("30111222".to_string()));
        assert_eq!(national_id_token("AB123456"), None);
        assert_eq!(national_id_token("123"), None);
    }
}
