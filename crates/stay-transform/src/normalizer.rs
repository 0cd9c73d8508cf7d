//! Conversion of one mapped row into an [`ImportRecord`].

use stay_model::{ColumnMapping, Field, ImportRecord};
use tracing::trace;

use crate::age::{age_at, parse_age};
use crate::datetime::parse_date;
use crate::document::{Document, classify_document, clean_passport, national_id_token};
use crate::error::{Result, RowError};
use crate::name::split_full_name;
use crate::options::NormalizationOptions;
use crate::row::RawRow;
use crate::text::{sanitize_optional, sanitize_text};

/// Normalizes raw rows into canonical records.
///
/// `process` returns `Ok(None)` for rows that carry no guest (blank or
/// partial rows) and a [`RowError`] for rows that name a guest but cannot be
/// completed.
#[derive(Debug, Clone, Default)]
pub struct RowNormalizer {
    options: NormalizationOptions,
}

struct MappedRow<'a> {
    row: &'a RawRow,
    mapping: &'a ColumnMapping,
}

impl<'a> MappedRow<'a> {
    fn raw(&self, field: Field) -> Option<&'a str> {
        self.mapping
            .header_for(field)
            .and_then(|header| self.row.get(header))
    }

    fn text(&self, field: Field) -> Option<String> {
        self.raw(field).and_then(sanitize_optional)
    }
}

impl RowNormalizer {
    pub fn new(options: NormalizationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizationOptions {
        &self.options
    }

    pub fn process(&self, row: &RawRow, mapping: &ColumnMapping) -> Result<Option<ImportRecord>> {
        let mapped = MappedRow { row, mapping };

        let (mut surname, mut given_name) = mapped
            .raw(Field::FullName)
            .map(split_full_name)
            .unwrap_or_default();
        if let Some(value) = mapped.text(Field::Surname) {
            surname = value;
        }
        if let Some(value) = mapped.text(Field::GivenName) {
            given_name = value;
        }
        if surname.is_empty() && given_name.is_empty() {
            trace!(origin = %row.origin, "no name, row skipped");
            return Ok(None);
        }

        let (national_id, passport) = resolve_document(&mapped);
        if national_id.is_none() && passport.is_none() {
            if !surname.is_empty() && !given_name.is_empty() {
                return Err(RowError::MissingDocument);
            }
            trace!(origin = %row.origin, "partial name without document, row skipped");
            return Ok(None);
        }
        if surname.is_empty() {
            return Err(RowError::EmptyNamePart {
                field: Field::Surname,
            });
        }
        if given_name.is_empty() {
            return Err(RowError::EmptyNamePart {
                field: Field::GivenName,
            });
        }

        let check_in_date = match mapped.raw(Field::CheckInDate) {
            None => return Err(RowError::MissingCheckInDate),
            Some(raw) => parse_date(raw).ok_or_else(|| RowError::InvalidCheckInDate {
                value: sanitize_text(raw),
            })?,
        };
        let check_out_date = mapped.raw(Field::CheckOutDate).and_then(parse_date);
        let birth_date = mapped.raw(Field::BirthDate).and_then(parse_date);

        let age = mapped
            .raw(Field::Age)
            .and_then(parse_age)
            .or_else(|| birth_date.and_then(|birth| age_at(birth, check_in_date)));

        let vehicle_details = mapped.text(Field::Vehicle);

        Ok(Some(ImportRecord {
            national_id,
            passport,
            surname,
            given_name,
            nationality: mapped
                .text(Field::Nationality)
                .unwrap_or_else(|| self.options.default_nationality.clone()),
            origin: mapped
                .text(Field::Origin)
                .unwrap_or_else(|| self.options.unspecified_origin.clone()),
            profession: mapped.text(Field::Profession),
            phone: mapped.text(Field::Phone),
            establishment: mapped.text(Field::Establishment),
            room: mapped
                .text(Field::Room)
                .unwrap_or_else(|| self.options.no_room.clone()),
            destination: mapped.text(Field::Destination),
            vehicle_present: vehicle_details.is_some(),
            vehicle_details,
            check_in_date,
            check_out_date,
            age,
            birth_date,
            source: row.origin.clone(),
        }))
    }
}

/// Resolves `(national_id, passport)` from the mapped document columns,
/// falling back to a scan of the other cells for a bare 7-8 digit number.
fn resolve_document(mapped: &MappedRow<'_>) -> (Option<String>, Option<String>) {
    let mut national_id = None;
    let mut passport = None;
    let passport_cell = mapped.raw(Field::Passport);

    if let Some(raw) = mapped.raw(Field::NationalId) {
        match classify_document(raw) {
            Some(Document::NationalId(id)) => national_id = Some(id),
            // A combined "document" column holding a passport.
            Some(Document::Passport(number)) if passport_cell.is_none() => passport = Some(number),
            _ => {}
        }
    }
    if let Some(number) = passport_cell.and_then(clean_passport) {
        passport = Some(number);
    }

    if national_id.is_none() && passport.is_none() {
        national_id = scan_for_national_id(mapped);
        if national_id.is_some() {
            trace!(origin = %mapped.row.origin, "national id found by cell scan");
        }
    }
    (national_id, passport)
}

/// First cell outside document and date columns that cleans to 7-8 digits.
fn scan_for_national_id(mapped: &MappedRow<'_>) -> Option<String> {
    mapped
        .row
        .cells
        .iter()
        .filter(|cell| {
            mapped
                .mapping
                .field_for(&cell.column)
                .is_none_or(|field| !field.is_document() && !field.is_date())
        })
        .find_map(|cell| national_id_token(&cell.value))
}
