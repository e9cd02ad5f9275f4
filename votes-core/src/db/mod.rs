mod error;
mod features;
mod schema;
mod votes;

pub use error::DbError;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;

const DEFAULT_DB_FILE: &str = "votes.db";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to the SQLite database.
///
/// Cloning is cheap; all clones share one connection guarded by a mutex.
/// The lock is held for the duration of a single operation (including its
/// transaction) and never across an `.await`.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// Where a database URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Memory,
    File(PathBuf),
}

impl DatabaseTarget {
    /// Parses `sqlite://<path>`, `sqlite:<path>`, `sqlite::memory:`, `:memory:`
    /// or a bare file path.
    pub fn parse(url: &str) -> Result<Self, DbError> {
        let url = url.trim();
        let rest = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if rest.is_empty() || rest == ":memory:" {
            return Ok(Self::Memory);
        }
        if rest.contains("://") {
            return Err(DbError::UnsupportedUrl(url.to_string()));
        }

        Ok(Self::File(PathBuf::from(rest)))
    }
}

impl Database {
    /// Open the database named by a connection URL.
    pub fn open(url: &str) -> Result<Self, DbError> {
        match DatabaseTarget::parse(url)? {
            DatabaseTarget::Memory => Self::open_memory(),
            DatabaseTarget::File(path) => Self::open_path(&path),
        }
    }

    /// Open the database file in the platform data directory.
    pub fn open_default() -> Result<Self, DbError> {
        Self::open_path(&Self::default_path()?)
    }

    pub fn open_path(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::from_connection(conn)
    }

    pub fn open_memory() -> Result<Self, DbError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn default_path() -> Result<PathBuf, DbError> {
        let dirs = directories::ProjectDirs::from("", "", "feature-votes").ok_or(DbError::NoDataDir)?;
        Ok(dirs.data_dir().join(DEFAULT_DB_FILE))
    }

    fn from_connection(conn: Connection) -> Result<Self, DbError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create the schema if it does not exist yet.
    pub fn migrate(&self) -> Result<(), DbError> {
        let conn = self.lock()?;
        conn.execute_batch(schema::SCHEMA)?;
        tracing::debug!("Database schema is up to date");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DbError> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }
}

/// Read an RFC 3339 timestamp column.
fn timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
