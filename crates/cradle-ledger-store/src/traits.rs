//! StateStore trait: the abstract interface for ledger state.
//!
//! This trait keeps the ledger storage-agnostic. Implementations include
//! SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use cradle_ledger_core::{Cell, MapId};

use crate::error::Result;

/// A single staged write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Overwrite a cell value.
    SetCell { cell: Cell, value: Vec<u8> },
    /// Insert or overwrite a map entry (last writer wins).
    MapInsert {
        map: MapId,
        key: [u8; 32],
        value: Vec<u8>,
    },
    /// Remove a map entry. Removing an absent key is a no-op.
    MapRemove { map: MapId, key: [u8; 32] },
}

/// The writes staged by one operation, committed as a unit.
///
/// A batch is built in memory and handed to [`StateStore::apply`]; the
/// store commits every op or none of them. Nothing is visible to readers
/// until the batch commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Stage a cell overwrite.
    pub fn set_cell(&mut self, cell: Cell, value: Vec<u8>) {
        self.ops.push(WriteOp::SetCell { cell, value });
    }

    /// Stage a map insert (overwrites silently).
    pub fn map_insert(&mut self, map: MapId, key: [u8; 32], value: Vec<u8>) {
        self.ops.push(WriteOp::MapInsert { map, key, value });
    }

    /// Stage a map removal.
    pub fn map_remove(&mut self, map: MapId, key: [u8; 32]) {
        self.ops.push(WriteOp::MapRemove { map, key });
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// The staged ops, in staging order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }
}

/// The StateStore trait: async interface for ledger state persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Committed reads**: reads only ever see committed state.
/// - **Atomic batches**: [`apply`](StateStore::apply) commits a whole
///   [`WriteBatch`] or nothing; a fault never leaves partial writes.
/// - **Ordered maps**: [`map_entries`](StateStore::map_entries) returns
///   entries sorted by key, so full scans are deterministic.
#[async_trait]
pub trait StateStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Cell Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Read a cell. Returns `None` until genesis initializes it.
    async fn cell_get(&self, cell: Cell) -> Result<Option<Vec<u8>>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Map Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Check whether a key is present in a map.
    async fn map_member(&self, map: MapId, key: &[u8; 32]) -> Result<bool>;

    /// Read a map entry. Absence is `Ok(None)`, not an error.
    async fn map_get(&self, map: MapId, key: &[u8; 32]) -> Result<Option<Vec<u8>>>;

    /// All entries of a map, ordered by key.
    async fn map_entries(&self, map: MapId) -> Result<Vec<([u8; 32], Vec<u8>)>>;

    /// Number of entries in a map.
    async fn map_len(&self, map: MapId) -> Result<u64>;

    // ─────────────────────────────────────────────────────────────────────────
    // Commit
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a batch of writes atomically.
    async fn apply(&self, batch: WriteBatch) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_staging_order() {
        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, vec![1]);
        batch.map_insert(MapId::Credentials, [2u8; 32], vec![3]);
        batch.map_remove(MapId::Records, [4u8; 32]);

        assert_eq!(batch.len(), 3);
        assert!(matches!(batch.ops()[0], WriteOp::SetCell { .. }));
        assert!(matches!(batch.ops()[1], WriteOp::MapInsert { .. }));
        assert!(matches!(batch.ops()[2], WriteOp::MapRemove { .. }));
    }

    #[test]
    fn test_empty_batch() {
        let batch = WriteBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}
