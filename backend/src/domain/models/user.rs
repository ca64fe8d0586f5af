//! Domain model for a user.
use serde::{Deserialize, Serialize};

/// A registered user of the tracker.
///
/// The password is an opaque string compared verbatim on authentication;
/// hashing is out of scope for this design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the record store on first save.
    pub id: Option<i64>,
    pub name: String,
    /// Unique across all users; matching is exact, no case normalization.
    pub email: String,
    pub password: String,
}
