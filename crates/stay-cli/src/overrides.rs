//! `--map HEADER=FIELD` arguments.

use stay_ingest::clean_header;
use stay_model::Field;

/// Parses `HEADER=FIELD` into a cleaned header and its canonical field.
///
/// The header is cleaned the same way sheet headers are, so `"Nro Doc"`
/// and `"nro_doc"` name the same column.
pub fn parse_override(raw: &str) -> Result<(String, Field), String> {
    let Some((header, field)) = raw.rsplit_once('=') else {
        return Err(format!("expected HEADER=FIELD, got '{raw}'"));
    };
    let header = clean_header(header);
    if header.is_empty() {
        return Err(format!("missing header in '{raw}'"));
    }
    let field = field.parse::<Field>().map_err(|_| {
        let known: Vec<&str> = Field::ALL.into_iter().map(Field::as_str).collect();
        format!(
            "unknown field '{}' (expected one of: {})",
            field.trim(),
            known.join(", ")
        )
    })?;
    Ok((header, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_cleaned() {
        assert_eq!(
            parse_override("Nro  Doc=national_id").unwrap(),
            ("nro_doc".to_string(), Field::NationalId)
        );
    }

    #[test]
    fn header_may_contain_equals() {
        assert_eq!(
            parse_override("a=b=passport").unwrap(),
            ("a=b".to_string(), Field::Passport)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_override("huesped").is_err());
        assert!(parse_override(" =surname").is_err());
        let err = parse_override("huesped=guest").unwrap_err();
        assert!(err.starts_with("unknown field 'guest'"));
        assert!(err.contains("check_in_date"));
    }
}
