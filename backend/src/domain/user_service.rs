//! User directory: registration, authentication, and owner lookup.
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::user::User;
use crate::storage::csv::{CsvConnection, UserRepository};
use crate::storage::traits::UserStore;

/// Service for managing users of the tracker.
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService.
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let user_repository = UserRepository::new((*connection).clone());
        Self { user_repository }
    }

    /// Authenticate by exact email lookup and verbatim password comparison.
    ///
    /// The two failure messages stay distinguishable; production callers
    /// that want to hide which one occurred collapse them at the edge.
    pub fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let Some(user) = self.user_repository.find_user_by_email(email)? else {
            warn!("authentication failed: no user for {}", email);
            return Err(DomainError::Authentication("user not found".to_string()));
        };

        if user.password != password {
            warn!("authentication failed: wrong password for {}", email);
            return Err(DomainError::Authentication("invalid password".to_string()));
        }

        Ok(user)
    }

    /// Register a new user after checking email uniqueness.
    ///
    /// The uniqueness check and the save are two separate store calls; a
    /// concurrent registration of the same email can slip between them.
    pub fn register(&self, user: User) -> DomainResult<User> {
        self.check_email_unique(&user.email)?;

        let stored = self.user_repository.save_user(&user)?;

        info!("registered user {:?} ({})", stored.id, stored.email);
        Ok(stored)
    }

    /// Fail when a user with exactly this email already exists.
    pub fn check_email_unique(&self, email: &str) -> DomainResult<()> {
        if self.user_repository.exists_by_email(email)? {
            return Err(DomainError::BusinessRule(
                "a user is already registered with this email".to_string(),
            ));
        }
        Ok(())
    }

    /// Look up a user by id; absent is not an error.
    pub fn lookup_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.user_repository.find_user_by_id(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> (UserService, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let conn = CsvConnection::new(temp_dir.path()).unwrap();
        (UserService::new(Arc::new(conn)), temp_dir)
    }

    fn user(email: &str) -> User {
        User {
            id: None,
            name: "Maria".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    fn auth_message(result: DomainResult<User>) -> String {
        match result {
            Err(DomainError::Authentication(msg)) => msg,
            other => panic!("expected an authentication error, got {:?}", other),
        }
    }

    #[test]
    fn test_register_returns_the_stored_user_with_an_id() {
        let (service, _temp_dir) = setup_test();

        let stored = service.register(user("maria@example.com")).unwrap();

        assert_eq!(stored.id, Some(1));
        assert_eq!(stored.email, "maria@example.com");
    }

    #[test]
    fn test_register_rejects_a_duplicate_email() {
        let (service, _temp_dir) = setup_test();
        service.register(user("maria@example.com")).unwrap();

        let result = service.register(user("maria@example.com"));

        match result {
            Err(DomainError::BusinessRule(msg)) => {
                assert_eq!(msg, "a user is already registered with this email")
            }
            other => panic!("expected a business rule error, got {:?}", other),
        }
    }

    #[test]
    fn test_email_uniqueness_is_exact_match() {
        let (service, _temp_dir) = setup_test();
        service.register(user("maria@example.com")).unwrap();

        // No case normalization: a different casing registers fine. The
        // check-then-save gap is likewise accepted single-process behavior.
        service.register(user("Maria@example.com")).unwrap();
    }

    #[test]
    fn test_authenticate_returns_the_matching_user() {
        let (service, _temp_dir) = setup_test();
        let stored = service.register(user("maria@example.com")).unwrap();

        let authenticated = service.authenticate("maria@example.com", "secret").unwrap();

        assert_eq!(authenticated, stored);
    }

    #[test]
    fn test_authenticate_unknown_email() {
        let (service, _temp_dir) = setup_test();

        let result = service.authenticate("absent@example.com", "whatever");

        assert_eq!(auth_message(result), "user not found");
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let (service, _temp_dir) = setup_test();
        service.register(user("maria@example.com")).unwrap();

        let result = service.authenticate("maria@example.com", "SECRET");

        assert_eq!(auth_message(result), "invalid password");
    }

    #[test]
    fn test_lookup_by_id() {
        let (service, _temp_dir) = setup_test();
        let stored = service.register(user("maria@example.com")).unwrap();

        let found = service.lookup_by_id(stored.id.unwrap()).unwrap();
        assert_eq!(found, Some(stored));

        let absent = service.lookup_by_id(999).unwrap();
        assert!(absent.is_none());
    }
}
