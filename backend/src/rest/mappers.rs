//! DTO ↔ domain conversions for the REST layer.

use shared::{EntryDto, EntryRequest, UserDto};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::entry::{Entry, EntryStatus, EntryType};
use crate::domain::models::user::User;
use crate::domain::UserService;

pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id.unwrap_or_default(),
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

pub fn entry_to_dto(entry: &Entry) -> EntryDto {
    EntryDto {
        id: entry.id,
        description: entry.description.clone(),
        month: entry.month,
        year: entry.year,
        amount: entry.amount,
        entry_type: entry.entry_type.map(entry_type_to_dto),
        status: entry_status_to_dto(entry.status),
        user_id: entry.user_id,
        created_at: entry.created_at,
    }
}

pub fn entry_type_to_dto(entry_type: EntryType) -> shared::EntryType {
    match entry_type {
        EntryType::Income => shared::EntryType::Income,
        EntryType::Expense => shared::EntryType::Expense,
    }
}

pub fn entry_status_to_dto(status: EntryStatus) -> shared::EntryStatus {
    match status {
        EntryStatus::Pending => shared::EntryStatus::Pending,
        EntryStatus::Settled => shared::EntryStatus::Settled,
        EntryStatus::Cancelled => shared::EntryStatus::Cancelled,
    }
}

/// Build a domain entry from the request payload, resolving the owner
/// through the user directory. An owner id that resolves to nothing is a
/// business failure; the entry never reaches validation.
pub fn entry_from_request(
    request: &EntryRequest,
    user_service: &UserService,
) -> DomainResult<Entry> {
    let user_id = match request.user_id {
        Some(id) => match user_service.lookup_by_id(id)? {
            Some(user) => user.id,
            None => {
                return Err(DomainError::BusinessRule(
                    "user not found for the given id".to_string(),
                ))
            }
        },
        None => None,
    };

    let entry_type = match &request.entry_type {
        Some(raw) => Some(raw.parse::<EntryType>().map_err(DomainError::Validation)?),
        None => None,
    };
    let status = match &request.status {
        Some(raw) => raw.parse::<EntryStatus>().map_err(DomainError::Validation)?,
        None => EntryStatus::Pending,
    };

    Ok(Entry {
        id: None,
        description: request.description.clone().unwrap_or_default(),
        month: request.month,
        year: request.year,
        amount: request.amount,
        entry_type,
        status,
        user_id,
        created_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::CsvConnection;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn setup_user_service() -> (UserService, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let conn = CsvConnection::new(temp_dir.path()).unwrap();
        (UserService::new(Arc::new(conn)), temp_dir)
    }

    fn request() -> EntryRequest {
        EntryRequest {
            description: Some("rent".to_string()),
            month: Some(3),
            year: Some(2024),
            amount: Some(1200.0),
            entry_type: Some("EXPENSE".to_string()),
            status: None,
            user_id: None,
        }
    }

    #[test]
    fn test_entry_from_request_resolves_the_owner() {
        let (user_service, _temp_dir) = setup_user_service();
        let stored = user_service
            .register(User {
                id: None,
                name: "Maria".to_string(),
                email: "maria@example.com".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        let mut req = request();
        req.user_id = stored.id;
        let entry = entry_from_request(&req, &user_service).unwrap();

        assert_eq!(entry.user_id, stored.id);
        assert_eq!(entry.entry_type, Some(EntryType::Expense));
    }

    #[test]
    fn test_entry_from_request_rejects_an_unknown_owner() {
        let (user_service, _temp_dir) = setup_user_service();

        let mut req = request();
        req.user_id = Some(42);
        let result = entry_from_request(&req, &user_service);

        match result {
            Err(DomainError::BusinessRule(msg)) => {
                assert_eq!(msg, "user not found for the given id")
            }
            other => panic!("expected a business rule error, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_from_request_rejects_an_unknown_type_string() {
        let (user_service, _temp_dir) = setup_user_service();

        let mut req = request();
        req.entry_type = Some("TRANSFER".to_string());

        assert!(entry_from_request(&req, &user_service).is_err());
    }
}
