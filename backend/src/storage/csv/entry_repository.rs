use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{Reader, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::domain::models::entry::{Entry, EntryFilter, EntryStatus, EntryType};
use crate::storage::traits::EntryStore;

const ENTRIES_HEADER: [&str; 9] = [
    "id",
    "description",
    "month",
    "year",
    "amount",
    "entry_type",
    "status",
    "user_id",
    "created_at",
];

/// CSV-backed entry repository.
#[derive(Clone)]
pub struct EntryRepository {
    connection: CsvConnection,
}

impl EntryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every entry from the entries file.
    fn read_entries(&self) -> Result<Vec<Entry>> {
        let path = self.connection.entries_file_path();
        self.connection.ensure_file_exists(&path, &ENTRIES_HEADER)?;

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut entries = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let id = record
                .get(0)
                .unwrap_or("")
                .parse::<i64>()
                .with_context(|| format!("invalid entry id in {}", path.display()))?;

            let status = match record.get(6).unwrap_or("").parse::<EntryStatus>() {
                Ok(status) => status,
                Err(e) => {
                    warn!("{} in {}, defaulting to PENDING", e, path.display());
                    EntryStatus::Pending
                }
            };

            entries.push(Entry {
                id: Some(id),
                description: record.get(1).unwrap_or("").to_string(),
                month: parse_field(record.get(2)),
                year: parse_field(record.get(3)),
                amount: parse_field(record.get(4)),
                entry_type: record.get(5).and_then(|s| s.parse::<EntryType>().ok()),
                status,
                user_id: parse_field(record.get(7)),
                created_at: record
                    .get(8)
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            });
        }

        Ok(entries)
    }

    /// Rewrite the entries file with the given records.
    fn write_entries(&self, entries: &[Entry]) -> Result<()> {
        let path = self.connection.entries_file_path();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        csv_writer.write_record(&ENTRIES_HEADER)?;
        for entry in entries {
            csv_writer.write_record(&[
                entry.id.unwrap_or_default().to_string(),
                entry.description.clone(),
                entry.month.map(|m| m.to_string()).unwrap_or_default(),
                entry.year.map(|y| y.to_string()).unwrap_or_default(),
                entry.amount.map(|a| a.to_string()).unwrap_or_default(),
                entry
                    .entry_type
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                entry.status.to_string(),
                entry.user_id.map(|u| u.to_string()).unwrap_or_default(),
                entry
                    .created_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ])?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    fn next_id(entries: &[Entry]) -> i64 {
        entries.iter().filter_map(|e| e.id).max().unwrap_or(0) + 1
    }

    /// Whether an entry matches the filter template. `None` filter fields
    /// are unconstrained; the description matches as a case-insensitive
    /// substring, everything else exactly.
    fn matches(entry: &Entry, filter: &EntryFilter) -> bool {
        if let Some(needle) = &filter.description {
            if !entry
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(month) = filter.month {
            if entry.month != Some(month) {
                return false;
            }
        }
        if let Some(year) = filter.year {
            if entry.year != Some(year) {
                return false;
            }
        }
        if let Some(user_id) = filter.user_id {
            if entry.user_id != Some(user_id) {
                return false;
            }
        }
        true
    }
}

/// Parse an optional CSV field; empty strings and garbage both read as None.
fn parse_field<T: std::str::FromStr>(field: Option<&str>) -> Option<T> {
    field.and_then(|s| if s.is_empty() { None } else { s.parse().ok() })
}

impl EntryStore for EntryRepository {
    fn save_entry(&self, entry: &Entry) -> Result<Entry> {
        let mut entries = self.read_entries()?;
        let mut stored = entry.clone();

        match stored.id {
            Some(id) => {
                if let Some(existing) = entries.iter_mut().find(|e| e.id == Some(id)) {
                    *existing = stored.clone();
                } else {
                    entries.push(stored.clone());
                }
            }
            None => {
                stored.id = Some(Self::next_id(&entries));
                entries.push(stored.clone());
            }
        }

        self.write_entries(&entries)?;
        debug!("stored entry {:?}", stored.id);

        Ok(stored)
    }

    fn find_entry_by_id(&self, id: i64) -> Result<Option<Entry>> {
        let entries = self.read_entries()?;
        Ok(entries.into_iter().find(|e| e.id == Some(id)))
    }

    fn delete_entry(&self, id: i64) -> Result<bool> {
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != Some(id));
        let removed = entries.len() < before;

        if removed {
            self.write_entries(&entries)?;
            debug!("deleted entry {}", id);
        }

        Ok(removed)
    }

    fn find_all(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let entries = self.read_entries()?;
        Ok(entries
            .into_iter()
            .filter(|e| Self::matches(e, filter))
            .collect())
    }

    fn sum_amount_by_user_and_type(&self, user_id: i64, entry_type: EntryType) -> Result<f64> {
        let entries = self.read_entries()?;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == Some(user_id) && e.entry_type == Some(entry_type))
            .filter_map(|e| e.amount)
            .sum())
    }
}
