//! SQLite implementation of the StateStore trait.
//!
//! This is the primary storage backend for the Cradle Ledger. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use cradle_ledger_core::{Cell, MapId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{StateStore, WriteBatch, WriteOp};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime. Batches commit inside a single
/// SQLite transaction, so a fault never leaves partial writes.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl StateStore for SqliteStore {
    async fn cell_get(&self, cell: Cell) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::LockPoisoned)?;

            conn.query_row(
                "SELECT value FROM cells WHERE cell = ?1",
                params![cell.name()],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    async fn map_member(&self, map: MapId, key: &[u8; 32]) -> Result<bool> {
        let key = *key;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::LockPoisoned)?;

            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM map_entries WHERE map = ?1 AND key = ?2)",
                params![map.name(), key.as_slice()],
                |row| row.get(0),
            )?;

            Ok(exists)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    async fn map_get(&self, map: MapId, key: &[u8; 32]) -> Result<Option<Vec<u8>>> {
        let key = *key;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::LockPoisoned)?;

            conn.query_row(
                "SELECT value FROM map_entries WHERE map = ?1 AND key = ?2",
                params![map.name(), key.as_slice()],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    async fn map_entries(&self, map: MapId) -> Result<Vec<([u8; 32], Vec<u8>)>> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::LockPoisoned)?;

            let mut stmt = conn.prepare(
                "SELECT key, value FROM map_entries WHERE map = ?1 ORDER BY key",
            )?;

            let rows: Vec<(Vec<u8>, Vec<u8>)> = stmt
                .query_map(params![map.name()], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut entries = Vec::with_capacity(rows.len());
            for (key, value) in rows {
                let key: [u8; 32] = key.try_into().map_err(|_| {
                    StoreError::InvalidData(format!("map key in {} is not 32 bytes", map.name()))
                })?;
                entries.push((key, value));
            }

            Ok(entries)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    async fn map_len(&self, map: MapId) -> Result<u64> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::LockPoisoned)?;

            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM map_entries WHERE map = ?1",
                params![map.name()],
                |row| row.get(0),
            )?;

            Ok(count as u64)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    async fn apply(&self, batch: WriteBatch) -> Result<()> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|_| StoreError::LockPoisoned)?;

            let tx = conn.transaction()?;

            for op in batch.ops() {
                match op {
                    WriteOp::SetCell { cell, value } => {
                        tx.execute(
                            "INSERT INTO cells (cell, value) VALUES (?1, ?2)
                             ON CONFLICT(cell) DO UPDATE SET value = excluded.value",
                            params![cell.name(), value],
                        )?;
                    }
                    WriteOp::MapInsert { map, key, value } => {
                        tx.execute(
                            "INSERT INTO map_entries (map, key, value) VALUES (?1, ?2, ?3)
                             ON CONFLICT(map, key) DO UPDATE SET value = excluded.value",
                            params![map.name(), key.as_slice(), value],
                        )?;
                    }
                    WriteOp::MapRemove { map, key } => {
                        tx.execute(
                            "DELETE FROM map_entries WHERE map = ?1 AND key = ?2",
                            params![map.name(), key.as_slice()],
                        )?;
                    }
                }
            }

            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }
}
