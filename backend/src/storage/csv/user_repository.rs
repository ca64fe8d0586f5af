use anyhow::{Context, Result};
use csv::{Reader, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tracing::debug;

use super::connection::CsvConnection;
use crate::domain::models::user::User;
use crate::storage::traits::UserStore;

const USERS_HEADER: [&str; 4] = ["id", "name", "email", "password"];

/// CSV-backed user repository.
#[derive(Clone)]
pub struct UserRepository {
    connection: CsvConnection,
}

impl UserRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every user from the users file.
    fn read_users(&self) -> Result<Vec<User>> {
        let path = self.connection.users_file_path();
        self.connection.ensure_file_exists(&path, &USERS_HEADER)?;

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut users = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let id = record
                .get(0)
                .unwrap_or("")
                .parse::<i64>()
                .with_context(|| format!("invalid user id in {}", path.display()))?;

            users.push(User {
                id: Some(id),
                name: record.get(1).unwrap_or("").to_string(),
                email: record.get(2).unwrap_or("").to_string(),
                password: record.get(3).unwrap_or("").to_string(),
            });
        }

        Ok(users)
    }

    /// Rewrite the users file with the given records.
    fn write_users(&self, users: &[User]) -> Result<()> {
        let path = self.connection.users_file_path();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        csv_writer.write_record(&USERS_HEADER)?;
        for user in users {
            csv_writer.write_record(&[
                user.id.unwrap_or_default().to_string(),
                user.name.clone(),
                user.email.clone(),
                user.password.clone(),
            ])?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    fn next_id(users: &[User]) -> i64 {
        users.iter().filter_map(|u| u.id).max().unwrap_or(0) + 1
    }
}

impl UserStore for UserRepository {
    fn save_user(&self, user: &User) -> Result<User> {
        let mut users = self.read_users()?;
        let mut stored = user.clone();

        match stored.id {
            Some(id) => {
                if let Some(existing) = users.iter_mut().find(|u| u.id == Some(id)) {
                    *existing = stored.clone();
                } else {
                    users.push(stored.clone());
                }
            }
            None => {
                stored.id = Some(Self::next_id(&users));
                users.push(stored.clone());
            }
        }

        self.write_users(&users)?;
        debug!("stored user {:?} ({})", stored.id, stored.email);

        Ok(stored)
    }

    fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let users = self.read_users()?;
        Ok(users.into_iter().find(|u| u.id == Some(id)))
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.read_users()?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    fn exists_by_email(&self, email: &str) -> Result<bool> {
        let users = self.read_users()?;
        Ok(users.iter().any(|u| u.email == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> (UserRepository, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let conn = CsvConnection::new(temp_dir.path()).unwrap();
        (UserRepository::new(conn), temp_dir)
    }

    fn user(email: &str) -> User {
        User {
            id: None,
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_save_assigns_sequential_ids() {
        let (repo, _temp_dir) = setup_test();

        let first = repo.save_user(&user("a@example.com")).unwrap();
        let second = repo.save_user(&user("b@example.com")).unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[test]
    fn test_find_by_email_is_exact_match() {
        let (repo, _temp_dir) = setup_test();
        repo.save_user(&user("maria@example.com")).unwrap();

        assert!(repo
            .find_user_by_email("maria@example.com")
            .unwrap()
            .is_some());
        // No case normalization: a different casing is a different email.
        assert!(repo
            .find_user_by_email("Maria@example.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_exists_by_email() {
        let (repo, _temp_dir) = setup_test();
        repo.save_user(&user("maria@example.com")).unwrap();

        assert!(repo.exists_by_email("maria@example.com").unwrap());
        assert!(!repo.exists_by_email("absent@example.com").unwrap());
    }

    #[test]
    fn test_users_survive_a_repository_reopen() {
        let temp_dir = tempdir().unwrap();
        let stored = {
            let conn = CsvConnection::new(temp_dir.path()).unwrap();
            let repo = UserRepository::new(conn);
            repo.save_user(&user("maria@example.com")).unwrap()
        };

        let conn = CsvConnection::new(temp_dir.path()).unwrap();
        let repo = UserRepository::new(conn);
        let found = repo.find_user_by_id(stored.id.unwrap()).unwrap().unwrap();

        assert_eq!(found, stored);
    }
}
