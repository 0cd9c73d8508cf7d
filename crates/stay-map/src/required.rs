//! Required-field check run on the fields mapped for an import.

use std::collections::BTreeSet;

use stay_model::{Field, RequiredGroup};

/// Returns the required groups not satisfied by `fields`, in a fixed order.
///
/// A name is satisfied by a combined name column or by both surname and
/// given name; a document by a national id or a passport column.
pub fn missing_groups(fields: &BTreeSet<Field>) -> Vec<RequiredGroup> {
    let mut missing = Vec::new();
    let has_name = fields.contains(&Field::FullName)
        || (fields.contains(&Field::Surname) && fields.contains(&Field::GivenName));
    if !has_name {
        missing.push(RequiredGroup::Name);
    }
    if !fields.contains(&Field::NationalId) && !fields.contains(&Field::Passport) {
        missing.push(RequiredGroup::Document);
    }
    if !fields.contains(&Field::CheckInDate) {
        missing.push(RequiredGroup::CheckInDate);
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(fields: &[Field]) -> BTreeSet<Field> {
        fields.iter().copied().collect()
    }

    #[test]
    fn combined_name_or_both_parts() {
        let base = [Field::NationalId, Field::CheckInDate];

        let mut combined = set(&base);
        combined.insert(Field::FullName);
        assert!(missing_groups(&combined).is_empty());

        let mut split = set(&base);
        split.insert(Field::Surname);
        assert_eq!(missing_groups(&split), vec![RequiredGroup::Name]);
        split.insert(Field::GivenName);
        assert!(missing_groups(&split).is_empty());
    }

    #[test]
    fn passport_alone_satisfies_the_document_group() {
        let fields = set(&[Field::FullName, Field::Passport, Field::CheckInDate]);
        assert!(missing_groups(&fields).is_empty());
    }

    #[test]
    fn reports_every_missing_group() {
        assert_eq!(
            missing_groups(&BTreeSet::new()),
            vec![
                RequiredGroup::Name,
                RequiredGroup::Document,
                RequiredGroup::CheckInDate
            ]
        );
    }
}
