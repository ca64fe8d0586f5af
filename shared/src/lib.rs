//! Shared data types for the finance tracker.
//!
//! These are the wire-format DTOs exchanged between the HTTP layer and any
//! frontend. The backend maps them to its internal domain models in its
//! `rest::mappers` module; nothing in here carries behavior.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Income,
    Expense,
}

/// Lifecycle status of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Pending,
    Settled,
    Cancelled,
}

/// A stored user, as returned by the API. The password never leaves the
/// backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

/// Net balance for a user: income total minus expense total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

/// Payload for creating or replacing an entry.
///
/// `entry_type` and `status` travel as raw strings ("INCOME", "PENDING", …)
/// so the backend can reject unknown values with a proper error instead of
/// a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRequest {
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub amount: Option<f64>,
    pub entry_type: Option<String>,
    /// Ignored on create; the backend always stores new entries as PENDING.
    pub status: Option<String>,
    pub user_id: Option<i64>,
}

/// A stored entry, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDto {
    pub id: Option<i64>,
    pub description: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub amount: Option<f64>,
    pub entry_type: Option<EntryType>,
    pub status: EntryStatus,
    pub user_id: Option<i64>,
    pub created_at: Option<NaiveDate>,
}

/// Body of the status-change endpoint. The status is a raw string so an
/// unknown value maps to a 400 rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_render_as_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&EntryType::Income).unwrap(),
            "\"INCOME\""
        );
        assert_eq!(
            serde_json::to_string(&EntryStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
    }

    #[test]
    fn test_entry_request_tolerates_missing_fields() {
        let request: EntryRequest = serde_json::from_str(
            r#"{"description":"rent","month":3,"year":2024,"amount":1200.0,
                "entry_type":"EXPENSE","status":null,"user_id":1}"#,
        )
        .unwrap();

        assert_eq!(request.description.as_deref(), Some("rent"));
        assert_eq!(request.status, None);
    }
}
