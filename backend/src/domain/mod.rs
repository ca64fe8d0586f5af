//! # Domain Module
//!
//! Business logic for the finance tracker, independent of any transport or
//! storage mechanism.
//!
//! ## Module Organization
//!
//! - **entry_service**: entry validation, lifecycle (create/update/delete,
//!   status changes), filtered search, and per-user balances
//! - **user_service**: registration with email uniqueness, authentication,
//!   and owner lookup
//! - **models**: the `User` and `Entry` records plus the search filter
//! - **errors**: the typed error taxonomy shared by both services
//!
//! ## Business Rules
//!
//! - Entries must carry a non-blank description, a month in 1–12, a
//!   four-digit year, an owner, a positive amount, and a type
//! - New entries always start out PENDING, whatever the caller supplied
//! - Emails are unique across users; matching is exact, no normalization

pub mod entry_service;
pub mod errors;
pub mod models;
pub mod user_service;

pub use entry_service::EntryService;
pub use errors::{DomainError, DomainResult};
pub use user_service::UserService;
