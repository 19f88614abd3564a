//! In-memory implementation of the StateStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use cradle_ledger_core::{Cell, MapId};

use crate::error::Result;
use crate::traits::{StateStore, WriteBatch, WriteOp};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Scalar cells, keyed by cell id.
    cells: BTreeMap<Cell, Vec<u8>>,

    /// Both ledger maps, each ordered by key.
    maps: BTreeMap<MapId, BTreeMap<[u8; 32], Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        let mut maps = BTreeMap::new();
        for map in MapId::ALL {
            maps.insert(map, BTreeMap::new());
        }
        Self {
            inner: RwLock::new(MemoryStoreInner {
                cells: BTreeMap::new(),
                maps,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn cell_get(&self, cell: Cell) -> Result<Option<Vec<u8>>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.cells.get(&cell).cloned())
    }

    async fn map_member(&self, map: MapId, key: &[u8; 32]) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .maps
            .get(&map)
            .map(|m| m.contains_key(key))
            .unwrap_or(false))
    }

    async fn map_get(&self, map: MapId, key: &[u8; 32]) -> Result<Option<Vec<u8>>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.maps.get(&map).and_then(|m| m.get(key).cloned()))
    }

    async fn map_entries(&self, map: MapId) -> Result<Vec<([u8; 32], Vec<u8>)>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .maps
            .get(&map)
            .map(|m| m.iter().map(|(k, v)| (*k, v.clone())).collect())
            .unwrap_or_default())
    }

    async fn map_len(&self, map: MapId) -> Result<u64> {
        let inner = self.inner.read().unwrap();
        Ok(inner.maps.get(&map).map(|m| m.len() as u64).unwrap_or(0))
    }

    async fn apply(&self, batch: WriteBatch) -> Result<()> {
        // One write guard for the whole batch; readers never observe a
        // half-applied batch.
        let mut inner = self.inner.write().unwrap();

        for op in batch.ops() {
            match op {
                WriteOp::SetCell { cell, value } => {
                    inner.cells.insert(*cell, value.clone());
                }
                WriteOp::MapInsert { map, key, value } => {
                    inner.maps.entry(*map).or_default().insert(*key, value.clone());
                }
                WriteOp::MapRemove { map, key } => {
                    if let Some(m) = inner.maps.get_mut(map) {
                        m.remove(key);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cell_set_and_get() {
        let store = MemoryStore::new();
        assert_eq!(store.cell_get(Cell::Round).await.unwrap(), None);

        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, 7u64.to_le_bytes().to_vec());
        store.apply(batch).await.unwrap();

        let value = store.cell_get(Cell::Round).await.unwrap().unwrap();
        assert_eq!(value, 7u64.to_le_bytes().to_vec());
    }

    #[tokio::test]
    async fn test_map_insert_get_member() {
        let store = MemoryStore::new();
        let key = [5u8; 32];

        assert!(!store.map_member(MapId::Credentials, &key).await.unwrap());
        assert_eq!(store.map_get(MapId::Credentials, &key).await.unwrap(), None);

        let mut batch = WriteBatch::new();
        batch.map_insert(MapId::Credentials, key, vec![1, 2, 3]);
        store.apply(batch).await.unwrap();

        assert!(store.map_member(MapId::Credentials, &key).await.unwrap());
        assert_eq!(
            store.map_get(MapId::Credentials, &key).await.unwrap(),
            Some(vec![1, 2, 3])
        );

        // Same key in the other map stays absent.
        assert!(!store.map_member(MapId::Records, &key).await.unwrap());
    }

    #[tokio::test]
    async fn test_map_insert_overwrites() {
        let store = MemoryStore::new();
        let key = [6u8; 32];

        let mut batch = WriteBatch::new();
        batch.map_insert(MapId::Records, key, vec![1]);
        store.apply(batch).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.map_insert(MapId::Records, key, vec![2]);
        store.apply(batch).await.unwrap();

        assert_eq!(
            store.map_get(MapId::Records, &key).await.unwrap(),
            Some(vec![2])
        );
        assert_eq!(store.map_len(MapId::Records).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_map_remove_is_noop_when_absent() {
        let store = MemoryStore::new();
        let key = [7u8; 32];

        let mut batch = WriteBatch::new();
        batch.map_remove(MapId::Credentials, key);
        store.apply(batch).await.unwrap();

        assert!(!store.map_member(MapId::Credentials, &key).await.unwrap());
    }

    #[tokio::test]
    async fn test_map_entries_ordered_by_key() {
        let store = MemoryStore::new();

        let mut batch = WriteBatch::new();
        batch.map_insert(MapId::Credentials, [9u8; 32], vec![9]);
        batch.map_insert(MapId::Credentials, [1u8; 32], vec![1]);
        batch.map_insert(MapId::Credentials, [4u8; 32], vec![4]);
        store.apply(batch).await.unwrap();

        let entries = store.map_entries(MapId::Credentials).await.unwrap();
        let keys: Vec<[u8; 32]> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![[1u8; 32], [4u8; 32], [9u8; 32]]);
    }

    #[tokio::test]
    async fn test_batch_applies_all_ops() {
        let store = MemoryStore::new();
        let key = [3u8; 32];

        let mut batch = WriteBatch::new();
        batch.set_cell(Cell::Round, 1u64.to_le_bytes().to_vec());
        batch.set_cell(Cell::Nonce, vec![0xAA; 32]);
        batch.map_insert(MapId::Records, key, vec![42]);
        store.apply(batch).await.unwrap();

        assert!(store.cell_get(Cell::Round).await.unwrap().is_some());
        assert!(store.cell_get(Cell::Nonce).await.unwrap().is_some());
        assert!(store.map_member(MapId::Records, &key).await.unwrap());
    }
}
