//! Match record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Append one matched rectangle per call.
//! - Read back every stored record.
//!
//! # Invariants
//! - Each insert is a single statement and therefore atomic.
//! - No transaction spans more than one record.
//! - Timestamps are stored as RFC 3339 UTC text with nanosecond precision.

use crate::db::DbError;
use crate::model::record::{NewRecord, StoredRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

const RECORD_SELECT_SQL: &str = "SELECT
    id,
    time,
    x,
    y,
    width,
    height,
    created_at,
    updated_at
FROM match_records";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    /// The shared connection lock was poisoned by a panicking holder.
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::LockPoisoned => write!(f, "record store lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the append-only record store.
pub trait RecordRepository {
    /// Appends one record and returns its generated id.
    fn insert_record(&self, record: &NewRecord) -> RepoResult<i64>;
    /// Returns every stored record. Order is not part of the contract.
    fn list_records(&self) -> RepoResult<Vec<StoredRecord>>;
    fn count_records(&self) -> RepoResult<u64>;
}

impl<R: RecordRepository + ?Sized> RecordRepository for &R {
    fn insert_record(&self, record: &NewRecord) -> RepoResult<i64> {
        (**self).insert_record(record)
    }

    fn list_records(&self) -> RepoResult<Vec<StoredRecord>> {
        (**self).list_records()
    }

    fn count_records(&self) -> RepoResult<u64> {
        (**self).count_records()
    }
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn insert_record(&self, record: &NewRecord) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO match_records (
                time,
                x,
                y,
                width,
                height
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                time_to_db(&record.time),
                record.rect.x,
                record.rect.y,
                record.rect.width,
                record.rect.height,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_records(&self) -> RepoResult<Vec<StoredRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn count_records(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM match_records;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

/// Record store shared across concurrent callers.
///
/// Owns the single process-wide connection behind a mutex. Every operation
/// takes the lock for exactly one statement, so inserts from concurrent
/// submissions interleave and a read-all sees only completed inserts.
#[derive(Debug, Clone)]
pub struct SharedRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SharedRecordStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl RecordRepository for SharedRecordStore {
    fn insert_record(&self, record: &NewRecord) -> RepoResult<i64> {
        let conn = self.lock()?;
        SqliteRecordRepository::new(&conn).insert_record(record)
    }

    fn list_records(&self) -> RepoResult<Vec<StoredRecord>> {
        let conn = self.lock()?;
        SqliteRecordRepository::new(&conn).list_records()
    }

    fn count_records(&self) -> RepoResult<u64> {
        let conn = self.lock()?;
        SqliteRecordRepository::new(&conn).count_records()
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<StoredRecord> {
    let id: i64 = row.get("id")?;
    let time_text: String = row.get("time")?;
    let time = parse_time(&time_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{time_text}` in match_records.time (id={id})"
        ))
    })?;

    Ok(StoredRecord {
        id,
        time,
        x: row.get("x")?,
        y: row.get("y")?,
        width: row.get("width")?,
        height: row.get("height")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn time_to_db(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{parse_time, time_to_db};
    use chrono::{TimeZone, Utc};

    #[test]
    fn time_text_keeps_nanoseconds() {
        let time = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let text = time_to_db(&time);
        assert_eq!(text, "2023-11-14T22:13:20.123456789Z");
        assert_eq!(parse_time(&text), Some(time));
    }

    #[test]
    fn parse_time_normalizes_offsets_to_utc() {
        let parsed = parse_time("2023-11-14T23:13:20+01:00").unwrap();
        assert_eq!(parsed, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert_eq!(parse_time("yesterday"), None);
    }
}
