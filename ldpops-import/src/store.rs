//! Opening the region catalog database.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Catalog database not found: {0}")]
    NotFound(String),

    #[error("Catalog database is not writable: {0}")]
    NotWritable(String),
}

/// An open, writable region catalog database.
pub struct CatalogDb {
    conn: Connection,
}

impl CatalogDb {
    /// Open the catalog at `path`.
    ///
    /// The file must already exist and be writable; both are checked up
    /// front so a bad path fails before any import work begins rather than
    /// partway through a run.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let meta = fs::metadata(path)
            .map_err(|_| StoreError::NotFound(path.display().to_string()))?;
        if !meta.is_file() {
            return Err(StoreError::NotFound(path.display().to_string()).into());
        }
        if meta.permissions().readonly() {
            return Err(StoreError::NotWritable(path.display().to_string()).into());
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Couldn't open catalog database: {:?}", path))?;

        Ok(CatalogDb { conn })
    }

    /// Wrap a connection the caller already owns (embedding and tests).
    pub fn from_connection(conn: Connection) -> Self {
        CatalogDb { conn }
    }

    pub fn connection(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
