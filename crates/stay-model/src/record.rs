//! Canonical import records and their person / stay projections.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a row came from: worksheet name and row number (header = row 1).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowOrigin {
    pub sheet: String,
    pub row: usize,
}

impl RowOrigin {
    pub fn new(sheet: impl Into<String>, row: usize) -> Self {
        Self {
            sheet: sheet.into(),
            row,
        }
    }
}

impl fmt::Display for RowOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sheet.is_empty() {
            write!(f, "row {}", self.row)
        } else {
            write!(f, "sheet '{}' row {}", self.sheet, self.row)
        }
    }
}

/// One normalized spreadsheet row: a person plus a stay.
///
/// At least one of `national_id` and `passport` is set; `surname` and
/// `given_name` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub national_id: Option<String>,
    pub passport: Option<String>,
    pub surname: String,
    pub given_name: String,
    pub nationality: String,
    pub origin: String,
    pub profession: Option<String>,
    pub phone: Option<String>,
    pub establishment: Option<String>,
    pub room: String,
    pub destination: Option<String>,
    pub vehicle_present: bool,
    pub vehicle_details: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: Option<NaiveDate>,
    pub age: Option<u8>,
    pub birth_date: Option<NaiveDate>,
    pub source: RowOrigin,
}

impl ImportRecord {
    /// Key used for intra-batch duplicate detection: national id, else passport.
    pub fn document_key(&self) -> Option<&str> {
        self.national_id.as_deref().or(self.passport.as_deref())
    }

    pub fn person(&self) -> PersonRecord {
        PersonRecord {
            national_id: self.national_id.clone(),
            passport: self.passport.clone(),
            surname: self.surname.clone(),
            given_name: self.given_name.clone(),
            nationality: self.nationality.clone(),
            origin: self.origin.clone(),
            birth_date: self.birth_date,
            profession: self.profession.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn stay(&self) -> StayRecord {
        StayRecord {
            establishment: self.establishment.clone(),
            room: self.room.clone(),
            age: self.age,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            destination: self.destination.clone(),
            vehicle_present: self.vehicle_present,
            vehicle_details: self.vehicle_details.clone(),
        }
    }
}

/// Fields persisted once per person, looked up by document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub national_id: Option<String>,
    pub passport: Option<String>,
    pub surname: String,
    pub given_name: String,
    pub nationality: String,
    pub origin: String,
    pub birth_date: Option<NaiveDate>,
    pub profession: Option<String>,
    pub phone: Option<String>,
}

impl PersonRecord {
    pub fn document_key(&self) -> Option<&str> {
        self.national_id.as_deref().or(self.passport.as_deref())
    }
}

/// Fields persisted once per check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRecord {
    pub establishment: Option<String>,
    pub room: String,
    /// Age at check-in.
    pub age: Option<u8>,
    pub check_in_date: NaiveDate,
    pub check_out_date: Option<NaiveDate>,
    pub destination: Option<String>,
    pub vehicle_present: bool,
    pub vehicle_details: Option<String>,
}
