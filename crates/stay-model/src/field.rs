//! Canonical fields that spreadsheet headers resolve to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A fixed, internal field name that raw headers are mapped onto.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Combined "surname and given name" column.
    FullName,
    Surname,
    GivenName,
    /// National identity number (7-8 digits).
    NationalId,
    Passport,
    Nationality,
    /// Where the guest travels from.
    Origin,
    Profession,
    Phone,
    /// Hotel or lodging name.
    Establishment,
    Room,
    Destination,
    /// Free-text vehicle details (plate, make).
    Vehicle,
    CheckInDate,
    CheckOutDate,
    Age,
    BirthDate,
}

impl Field {
    /// Every canonical field, in declaration order.
    pub const ALL: [Field; 17] = [
        Field::FullName,
        Field::Surname,
        Field::GivenName,
        Field::NationalId,
        Field::Passport,
        Field::Nationality,
        Field::Origin,
        Field::Profession,
        Field::Phone,
        Field::Establishment,
        Field::Room,
        Field::Destination,
        Field::Vehicle,
        Field::CheckInDate,
        Field::CheckOutDate,
        Field::Age,
        Field::BirthDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Surname => "surname",
            Field::GivenName => "given_name",
            Field::NationalId => "national_id",
            Field::Passport => "passport",
            Field::Nationality => "nationality",
            Field::Origin => "origin",
            Field::Profession => "profession",
            Field::Phone => "phone",
            Field::Establishment => "establishment",
            Field::Room => "room",
            Field::Destination => "destination",
            Field::Vehicle => "vehicle",
            Field::CheckInDate => "check_in_date",
            Field::CheckOutDate => "check_out_date",
            Field::Age => "age",
            Field::BirthDate => "birth_date",
        }
    }

    /// True for fields whose cell values are parsed as dates.
    pub fn is_date(self) -> bool {
        matches!(
            self,
            Field::CheckInDate | Field::CheckOutDate | Field::BirthDate
        )
    }

    /// True for fields that carry an identity document.
    pub fn is_document(self) -> bool {
        matches!(self, Field::NationalId | Field::Passport)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ModelError::UnknownField(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_field_name() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" National_ID ".parse::<Field>().unwrap(), Field::NationalId);
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = "shoe_size".parse::<Field>().unwrap_err();
        assert_eq!(err, ModelError::UnknownField("shoe_size".to_string()));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Field::CheckInDate).unwrap();
        assert_eq!(json, "\"check_in_date\"");
    }
}
