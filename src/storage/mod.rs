//! SQLite-backed report persistence.
//!
//! Saves and restores a [`Report`]'s pages and visuals as opaque JSON blobs.
//! The compilation engine never reads this store; it only works on whatever
//! report is in memory.
//!
//! # Design
//!
//! - Key-value table with JSON values
//! - Versioned: auto-clears on version mismatch
//!
//! # Keys
//!
//! ```text
//! pages    -> [Page, ...]
//! visuals  -> [Visual, ...]
//! ```

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::report::{Page, Report, Visual};

/// Current store schema version. Bump this when the blob format changes.
const STORE_VERSION: i32 = 1;

const KEY_PAGES: &str = "pages";
const KEY_VISUALS: &str = "visuals";

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to determine data directory")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent store for report layout.
pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open or create the store at `path`, creating parent directories.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        debug!(path = %path.display(), "opened report store");
        Ok(store)
    }

    /// Open the store at `~/.mosaic/report.db`.
    pub fn open_default() -> StorageResult<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    pub fn default_path() -> StorageResult<PathBuf> {
        let base = dirs::home_dir().ok_or(StorageError::NoDataDir)?;
        Ok(base.join(".mosaic").join("report.db"))
    }

    fn init(&self) -> StorageResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        let stored_version: Option<i32> = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = 'version'", [], |row| {
                let s: String = row.get(0)?;
                Ok(s.parse().unwrap_or(0))
            })
            .optional()?;

        match stored_version {
            Some(v) if v == STORE_VERSION => {}
            Some(v) => {
                warn!(found = v, expected = STORE_VERSION, "store version mismatch, clearing");
                self.clear()?;
                self.set_version()?;
            }
            None => self.set_version()?,
        }

        Ok(())
    }

    fn set_version(&self) -> StorageResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('version', ?)",
            params![STORE_VERSION.to_string()],
        )?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    /// Save pages and visuals, replacing whatever was stored.
    pub fn save_report(&mut self, report: &Report) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        put(&tx, KEY_PAGES, &report.pages)?;
        put(&tx, KEY_VISUALS, &report.visuals)?;
        tx.commit()?;
        debug!(
            pages = report.pages.len(),
            visuals = report.visuals.len(),
            "saved report"
        );
        Ok(())
    }

    /// Restore a saved report, or `None` when nothing usable is stored.
    ///
    /// A report needs both blobs and at least one page.
    pub fn load_report(&self) -> StorageResult<Option<Report>> {
        let pages: Option<Vec<Page>> = self.get(KEY_PAGES)?;
        let visuals: Option<Vec<Visual>> = self.get(KEY_VISUALS)?;
        match (pages, visuals) {
            (Some(pages), Some(visuals)) if !pages.is_empty() => {
                Ok(Some(Report::from_parts(pages, visuals)))
            }
            _ => Ok(None),
        }
    }

    /// Delete all stored entries (but keep metadata).
    pub fn clear(&self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM store", [])?;
        Ok(())
    }
}

fn put<T: Serialize>(conn: &Connection, key: &str, value: &T) -> StorageResult<()> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT OR REPLACE INTO store (key, value) VALUES (?, ?)",
        params![key, json],
    )?;
    Ok(())
}
