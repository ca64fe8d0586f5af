//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! record-store backends to be used interchangeably in the domain layer.

use anyhow::Result;

use crate::domain::models::entry::{Entry, EntryFilter, EntryType};
use crate::domain::models::user::User;

/// Trait defining the interface for user record storage.
pub trait UserStore: Send + Sync {
    /// Persist a user. Assigns the next numeric id when the record has
    /// none; returns the stored record.
    fn save_user(&self, user: &User) -> Result<User>;

    /// Retrieve a user by id.
    fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Retrieve a user by exact email match.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Whether a user with exactly this email exists.
    fn exists_by_email(&self, email: &str) -> Result<bool>;
}

/// Trait defining the interface for entry record storage.
pub trait EntryStore: Send + Sync {
    /// Persist an entry. Assigns the next numeric id when the record has
    /// none, otherwise replaces the stored row; returns the stored record.
    fn save_entry(&self, entry: &Entry) -> Result<Entry>;

    /// Retrieve an entry by id.
    fn find_entry_by_id(&self, id: i64) -> Result<Option<Entry>>;

    /// Remove an entry by id. Returns true when a row was removed.
    fn delete_entry(&self, id: i64) -> Result<bool>;

    /// Filter-by-example lookup; see `EntryFilter` for the per-field match
    /// semantics. Returns matches in store-natural order.
    fn find_all(&self, filter: &EntryFilter) -> Result<Vec<Entry>>;

    /// Sum of amounts over a user's entries of the given type. Entries of
    /// every status count.
    fn sum_amount_by_user_and_type(&self, user_id: i64, entry_type: EntryType) -> Result<f64>;
}
