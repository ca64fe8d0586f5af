use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// CsvConnection manages the data directory and the per-entity CSV files.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory, resolved from the
    /// `FINANCE_TRACKER_DATA` environment variable with a home-relative
    /// fallback.
    pub fn new_default() -> Result<Self> {
        let data_dir = match std::env::var("FINANCE_TRACKER_DATA") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => {
                let home = std::env::var("HOME")
                    .or_else(|_| std::env::var("USERPROFILE"))
                    .map_err(|_| anyhow::anyhow!("could not determine home directory"))?;
                PathBuf::from(home).join(".finance-tracker")
            }
        };

        info!("using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn users_file_path(&self) -> PathBuf {
        self.base_directory.join("users.csv")
    }

    pub fn entries_file_path(&self) -> PathBuf {
        self.base_directory.join("entries.csv")
    }

    /// Create the file with its header row when missing.
    pub fn ensure_file_exists(&self, path: &Path, header: &[&str]) -> Result<()> {
        if !path.exists() {
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(header)?;
            writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_missing_base_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("data").join("tracker");

        let conn = CsvConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(conn.users_file_path(), nested.join("users.csv"));
    }

    #[test]
    fn test_ensure_file_exists_writes_header_once() {
        let temp_dir = tempdir().unwrap();
        let conn = CsvConnection::new(temp_dir.path()).unwrap();
        let path = conn.users_file_path();

        conn.ensure_file_exists(&path, &["id", "name"]).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        conn.ensure_file_exists(&path, &["id", "name"]).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, "id,name\n");
        assert_eq!(first, second);
    }
}
