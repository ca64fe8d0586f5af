//! Entry ledger: validation, lifecycle, and filtered search.
use chrono::Local;
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::entry::{Entry, EntryFilter, EntryStatus, EntryType};
use crate::storage::csv::{CsvConnection, EntryRepository};
use crate::storage::traits::EntryStore;

/// Service for recording and querying financial entries.
#[derive(Clone)]
pub struct EntryService {
    entry_repository: EntryRepository,
}

impl EntryService {
    /// Create a new EntryService.
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let entry_repository = EntryRepository::new((*connection).clone());
        Self { entry_repository }
    }

    /// Run the validation rules in order, stopping at the first failure.
    ///
    /// The order is part of the contract: when several fields are invalid,
    /// the earliest rule's message is the one surfaced.
    pub fn validate(&self, entry: &Entry) -> DomainResult<()> {
        if entry.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "provide a valid description".to_string(),
            ));
        }
        match entry.month {
            Some(month) if (1..=12).contains(&month) => {}
            _ => {
                return Err(DomainError::Validation(
                    "provide a valid month".to_string(),
                ))
            }
        }
        match entry.year {
            // Digit count of the signed decimal rendering, so -999 passes.
            Some(year) if year.to_string().len() == 4 => {}
            _ => {
                return Err(DomainError::Validation(
                    "provide a valid year".to_string(),
                ))
            }
        }
        if entry.user_id.is_none() {
            return Err(DomainError::Validation("provide a user".to_string()));
        }
        match entry.amount {
            Some(amount) if amount > 0.0 => {}
            _ => {
                return Err(DomainError::Validation(
                    "provide a valid amount".to_string(),
                ))
            }
        }
        if entry.entry_type.is_none() {
            return Err(DomainError::Validation(
                "provide a transaction type".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and persist a new entry. The stored entry always starts out
    /// PENDING, whatever status the caller supplied.
    pub fn create(&self, entry: Entry) -> DomainResult<Entry> {
        self.validate(&entry)?;

        let entry = Entry {
            status: EntryStatus::Pending,
            created_at: entry.created_at.or_else(|| Some(Local::now().date_naive())),
            ..entry
        };
        let stored = self.entry_repository.save_entry(&entry)?;

        info!("created entry {:?} for user {:?}", stored.id, stored.user_id);
        Ok(stored)
    }

    /// Validate and persist changes to an existing entry. The caller's
    /// status is preserved, not forced.
    pub fn update(&self, entry: Entry) -> DomainResult<Entry> {
        if entry.id.is_none() {
            return Err(DomainError::MissingId("update"));
        }
        self.validate(&entry)?;

        let stored = self.entry_repository.save_entry(&entry)?;

        info!("updated entry {:?}", stored.id);
        Ok(stored)
    }

    /// Remove an entry. The entry must already carry an identifier.
    pub fn delete(&self, entry: &Entry) -> DomainResult<()> {
        let id = entry.id.ok_or(DomainError::MissingId("delete"))?;
        self.entry_repository.delete_entry(id)?;

        info!("deleted entry {}", id);
        Ok(())
    }

    /// Rewrite the status and run the full update path. Every field is
    /// re-validated, so an otherwise-invalid entry fails here even though
    /// only the status changed.
    pub fn set_status(&self, entry: Entry, status: EntryStatus) -> DomainResult<Entry> {
        let entry = Entry { status, ..entry };
        self.update(entry)
    }

    /// Filter-by-example search. Returns a materialized snapshot in
    /// store-natural order.
    pub fn search(&self, filter: &EntryFilter) -> DomainResult<Vec<Entry>> {
        let entries = self.entry_repository.find_all(filter)?;
        Ok(entries)
    }

    /// Look up a single entry; absent is not an error.
    pub fn find_by_id(&self, id: i64) -> DomainResult<Option<Entry>> {
        Ok(self.entry_repository.find_entry_by_id(id)?)
    }

    /// Net balance for a user: income total minus expense total, across
    /// entries of every status.
    pub fn balance_for_user(&self, user_id: i64) -> DomainResult<f64> {
        let income = self
            .entry_repository
            .sum_amount_by_user_and_type(user_id, EntryType::Income)?;
        let expense = self
            .entry_repository
            .sum_amount_by_user_and_type(user_id, EntryType::Expense)?;
        Ok(income - expense)
    }
}
