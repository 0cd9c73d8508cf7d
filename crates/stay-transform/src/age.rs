//! Age parsing and computation. Valid ages lie strictly between 0 and 150.

use chrono::NaiveDate;

use crate::datetime::years_between;

fn bounded(age: i64) -> Option<u8> {
    if (1..150).contains(&age) {
        u8::try_from(age).ok()
    } else {
        None
    }
}

/// Parses an explicit age cell (`"34"`, `"34.0"`); fractions are truncated.
pub fn parse_age(value: &str) -> Option<u8> {
    let number: f64 = value.trim().replace(',', ".").parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    bounded(number.trunc() as i64)
}

/// Age on `reference` for someone born on `birth`.
pub fn age_at(birth: NaiveDate, reference: NaiveDate) -> Option<u8> {
    bounded(i64::from(years_between(birth, reference)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_ages() {
        assert_eq!(parse_age("34"), Some(34));
        assert_eq!(parse_age(" 34.0 "), Some(34));
        assert_eq!(parse_age("34,9"), Some(34));
        assert_eq!(parse_age("0"), None);
        assert_eq!(parse_age("150"), None);
        assert_eq!(parse_age("-3"), None);
        assert_eq!(parse_age("treinta"), None);
    }

    #[test]
    fn computed_age_is_bounded_too() {
        let birth = NaiveDate::from_ymd_opt(2000, 5, 20).unwrap();
        assert_eq!(
            age_at(birth, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()),
            Some(23)
        );
        assert_eq!(
            age_at(birth, NaiveDate::from_ymd_opt(2000, 12, 1).unwrap()),
            None
        );
    }
}
