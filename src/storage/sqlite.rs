//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params};
use crate::{Result, Error};
use crate::record::{AnalysisRecord, Scores, SentimentLabel};
use super::schema;

/// Default number of records returned by [`SqliteStore::list_recent`] callers.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Upper bound applied to history requests at the HTTP boundary.
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// SQLite-backed append-only log of analysis records.
///
/// The store only remembers where the database lives; each operation opens a
/// fresh connection and drops it before returning. Write serialization is
/// left to SQLite's file locking.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open a database file (creates it and its parent directory if missing)
    /// and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::StorageInit(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let store = Self { path: path.to_path_buf() };
        store.initialize_schema()?;
        tracing::debug!("Opened sentiment store at {}", path.display());
        Ok(store)
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Idempotently create the analyses table
    pub fn initialize_schema(&self) -> Result<()> {
        let init = || -> Result<()> {
            let conn = self.connect()?;
            for stmt in schema::all_schema_statements() {
                conn.execute(stmt, [])?;
            }
            Ok(())
        };

        init().map_err(|e| {
            Error::StorageInit(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Append one record. Fails if the id already exists.
    pub fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        let conn = self.connect().map_err(|e| Error::StorageWrite(e.to_string()))?;
        conn.execute(
            schema::INSERT_ANALYSIS,
            params![
                record.id,
                record.text,
                record.label.as_str(),
                record.compound,
                record.scores.neg,
                record.scores.neu,
                record.scores.pos,
                record.timestamp,
            ],
        )
        .map_err(|e| Error::StorageWrite(format!("insert {}: {}", record.id, e)))?;

        tracing::debug!("Stored analysis {} ({})", record.id, record.label);
        Ok(())
    }

    /// Up to `limit` records, newest first.
    ///
    /// Records sharing a timestamp come back in reverse insertion order.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(schema::SELECT_RECENT)?;

        let records = stmt
            .query_map([limit as i64], |row| Self::row_to_record(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Count all records
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to an AnalysisRecord
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<AnalysisRecord> {
        let label_str: String = row.get(2)?;
        let label: SentimentLabel = label_str.parse().map_err(|e: Error| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let compound: f64 = row.get(3)?;

        Ok(AnalysisRecord {
            id: row.get(0)?,
            text: row.get(1)?,
            label,
            compound,
            scores: Scores {
                neg: row.get(4)?,
                neu: row.get(5)?,
                pos: row.get(6)?,
                compound,
            },
            timestamp: row.get(7)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("sentiment.db")).unwrap();
        (dir, store)
    }

    fn sample_record(text: &str, compound: f64, timestamp: &str) -> AnalysisRecord {
        let mut record = AnalysisRecord::new(
            text,
            Scores { neg: 0.1, neu: 0.6, pos: 0.3, compound },
        );
        record.timestamp = timestamp.to_string();
        record
    }

    #[test]
    fn test_insert_and_list() {
        let (_dir, store) = temp_store();

        let record = sample_record("nice day", 0.42, "2024-05-01T10:00:00.000000Z");
        store.insert(&record).unwrap();

        let listed = store.list_recent(DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(listed, vec![record]);
    }

    #[test]
    fn test_empty_history() {
        let (_dir, store) = temp_store();
        assert!(store.list_recent(DEFAULT_HISTORY_LIMIT).unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_recent_first_with_limit() {
        let (_dir, store) = temp_store();

        store.insert(&sample_record("first", 0.1, "2024-05-01T10:00:00.000001Z")).unwrap();
        store.insert(&sample_record("second", 0.2, "2024-05-01T10:00:00.000002Z")).unwrap();
        store.insert(&sample_record("third", 0.3, "2024-05-01T10:00:00.000003Z")).unwrap();

        let listed = store.list_recent(2).unwrap();
        let texts: Vec<_> = listed.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["third", "second"]);
    }

    #[test]
    fn test_timestamp_ties_use_insertion_order() {
        let (_dir, store) = temp_store();
        let ts = "2024-05-01T10:00:00.000000Z";

        store.insert(&sample_record("a", 0.0, ts)).unwrap();
        store.insert(&sample_record("b", 0.0, ts)).unwrap();
        store.insert(&sample_record("c", 0.0, ts)).unwrap();

        let texts: Vec<_> = store
            .list_recent(10)
            .unwrap()
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let (_dir, store) = temp_store();

        let record = sample_record("once", 0.0, "2024-05-01T10:00:00.000000Z");
        store.insert(&record).unwrap();

        let err = store.insert(&record).unwrap_err();
        assert!(matches!(err, Error::StorageWrite(_)));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_schema_init_idempotent() {
        let (dir, store) = temp_store();
        store.insert(&sample_record("kept", 0.5, "2024-05-01T10:00:00.000000Z")).unwrap();

        store.initialize_schema().unwrap();
        let reopened = SqliteStore::open(&dir.path().join("sentiment.db")).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }

    #[test]
    fn test_open_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("sentiment.db");

        let store = SqliteStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_open_unusable_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let err = SqliteStore::open(&blocker.join("sentiment.db")).unwrap_err();
        assert!(matches!(err, Error::StorageInit(_)));
    }
}
