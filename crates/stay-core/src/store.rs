//! Persistence seam: how valid records are handed to a guest store.
//!
//! The store owns cross-batch policy (existing persons, repeated stays).
//! [`commit`] only walks the batch, records failures per record, and keeps
//! going.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use stay_model::{ImportResult, PersonRecord, RowFailure, StayRecord};
use thiserror::Error;
use tracing::{debug, warn};

use crate::progress::ImportProgress;

/// Identifier a store assigns to a person.
pub type PersonId = u64;

/// Storage for people and their stays.
pub trait GuestStore {
    type Error: fmt::Display;

    /// Returns the id of the person with the same document, creating the
    /// person when none exists.
    fn find_or_create_person(&mut self, person: &PersonRecord) -> Result<PersonId, Self::Error>;

    fn create_stay(&mut self, person: PersonId, stay: &StayRecord) -> Result<(), Self::Error>;
}

/// Outcome of committing one import result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub stays_created: usize,
    pub failures: Vec<RowFailure>,
}

impl CommitSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Stores every valid record of `result`: find-or-create the person, then
/// create the stay. A failing record is reported and the rest continue.
pub fn commit<S, F>(result: &ImportResult, store: &mut S, mut progress: F) -> CommitSummary
where
    S: GuestStore,
    F: FnMut(&ImportProgress),
{
    let total = result.valid.len();
    let mut summary = CommitSummary::default();

    for (idx, record) in result.valid.iter().enumerate() {
        progress(&ImportProgress::new(
            idx + 1,
            total,
            format!("saving record {} of {total}", idx + 1),
        ));

        let outcome = store
            .find_or_create_person(&record.person())
            .and_then(|person| store.create_stay(person, &record.stay()));
        match outcome {
            Ok(()) => summary.stays_created += 1,
            Err(error) => {
                warn!(origin = %record.source, %error, "record not stored");
                summary.failures.push(RowFailure {
                    origin: record.source.clone(),
                    message: error.to_string(),
                });
            }
        }
    }

    debug!(
        stored = summary.stays_created,
        failed = summary.failures.len(),
        "commit finished"
    );
    summary
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryStoreError {
    #[error("person has no document")]
    MissingDocument,
    #[error("unknown person id {0}")]
    UnknownPerson(PersonId),
    #[error("a stay starting {check_in} is already recorded for this person")]
    DuplicateStay { check_in: NaiveDate },
}

/// In-memory [`GuestStore`]: people keyed by document, one stay per person
/// and check-in date.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    people: Vec<PersonRecord>,
    by_document: BTreeMap<String, PersonId>,
    stays: Vec<(PersonId, StayRecord)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn people(&self) -> &[PersonRecord] {
        &self.people
    }

    pub fn stays(&self) -> &[(PersonId, StayRecord)] {
        &self.stays
    }

    pub fn person(&self, id: PersonId) -> Option<&PersonRecord> {
        usize::try_from(id).ok().and_then(|idx| self.people.get(idx))
    }
}

impl GuestStore for MemoryStore {
    type Error = MemoryStoreError;

    fn find_or_create_person(&mut self, person: &PersonRecord) -> Result<PersonId, Self::Error> {
        let key = person
            .document_key()
            .ok_or(MemoryStoreError::MissingDocument)?;
        if let Some(id) = self.by_document.get(key) {
            return Ok(*id);
        }
        let id = self.people.len() as PersonId;
        self.people.push(person.clone());
        self.by_document.insert(key.to_string(), id);
        Ok(id)
    }

    fn create_stay(&mut self, person: PersonId, stay: &StayRecord) -> Result<(), Self::Error> {
        if self.person(person).is_none() {
            return Err(MemoryStoreError::UnknownPerson(person));
        }
        if self
            .stays
            .iter()
            .any(|(id, existing)| *id == person && existing.check_in_date == stay.check_in_date)
        {
            return Err(MemoryStoreError::DuplicateStay {
                check_in: stay.check_in_date,
            });
        }
        self.stays.push((person, stay.clone()));
        Ok(())
    }
}
