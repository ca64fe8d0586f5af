//! Domain model for a financial entry.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(EntryType::Income),
            "EXPENSE" => Ok(EntryType::Expense),
            other => Err(format!("unknown entry type: {}", other)),
        }
    }
}

/// Lifecycle status of a ledger entry.
///
/// New entries always start out `Pending`; `Settled` and `Cancelled` are
/// reached through the status-change operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Pending,
    Settled,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Settled => "SETTLED",
            EntryStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(EntryStatus::Pending),
            "SETTLED" => Ok(EntryStatus::Settled),
            "CANCELLED" => Ok(EntryStatus::Cancelled),
            other => Err(format!("unknown entry status: {}", other)),
        }
    }
}

/// A single financial transaction owned by a user.
///
/// The per-field `Option`s are part of the contract: validation tells
/// "absent" apart from "out of range" for each field, and an entry may carry
/// invalid fields into the update path (see `EntryService::set_status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Assigned by the record store on first save.
    pub id: Option<i64>,
    pub description: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub amount: Option<f64>,
    pub entry_type: Option<EntryType>,
    pub status: EntryStatus,
    /// Owning user.
    pub user_id: Option<i64>,
    /// Registration date, informational only.
    pub created_at: Option<NaiveDate>,
}

/// Filter-by-example template for entry search.
///
/// `None` fields are unconstrained. `description` matches as a
/// case-insensitive substring; the remaining fields match exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub user_id: Option<i64>,
}
