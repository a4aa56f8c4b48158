use std::sync::Arc;

use anyhow::{ensure, Result};
use shared::domain::{Item, ItemId, ItemParams};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("item {0} not found")]
    NotFound(ItemId),
}

/// Handle to the in-memory item table. Clones share the same records.
#[derive(Clone, Default)]
pub struct Storage {
    table: Arc<RwLock<ItemTable>>,
}

#[derive(Debug)]
struct ItemTable {
    // Insertion order. Ids are handed out in increasing order and records are
    // never removed, so this is also sorted by id.
    items: Vec<Item>,
    next_id: i64,
}

impl Default for ItemTable {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl ItemTable {
    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |item| item.id).ok()
    }
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn health_check(&self) -> Result<()> {
        let table = self.table.read().await;
        ensure!(
            table.next_id == table.items.len() as i64 + 1,
            "item id counter out of sync: next id {} with {} stored items",
            table.next_id,
            table.items.len()
        );
        Ok(())
    }

    /// Stores a new record under the next unused id and returns it.
    pub async fn save(&self, params: ItemParams) -> Item {
        let mut table = self.table.write().await;
        let id = ItemId(table.next_id);
        table.next_id += 1;
        let item = params.into_item(id);
        table.items.push(item.clone());
        debug!(item_id = %id, "item stored");
        item
    }

    pub async fn find_by_id(&self, id: ItemId) -> Option<Item> {
        let table = self.table.read().await;
        table.position(id).map(|index| table.items[index].clone())
    }

    pub async fn find_all(&self) -> Vec<Item> {
        self.table.read().await.items.clone()
    }

    /// Replaces name, price and quantity of an existing record in place.
    pub async fn update(&self, id: ItemId, params: ItemParams) -> Result<Item, StorageError> {
        let mut table = self.table.write().await;
        let index = table.position(id).ok_or(StorageError::NotFound(id))?;
        let item = &mut table.items[index];
        item.apply(params);
        debug!(item_id = %id, "item updated");
        Ok(item.clone())
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.items.len()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
