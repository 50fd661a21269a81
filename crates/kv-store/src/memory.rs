use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{Result, Table, TableName};

/// In-memory key-value table.
///
/// Provides the same interface as the PostgreSQL implementation.
/// Clones share the same underlying rows.
#[derive(Clone)]
pub struct InMemoryTable {
    name: TableName,
    rows: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryTable {
    /// Creates a new empty table.
    pub fn new(name: TableName) -> Self {
        Self {
            name,
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored items.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl Table for InMemoryTable {
    fn name(&self) -> &TableName {
        &self.name
    }

    async fn put(&self, key: &str, item: Value) -> Result<()> {
        self.rows.write().await.insert(key.to_string(), item);
        metrics::counter!("kv_store_puts_total", "table" => self.name.to_string()).increment(1);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.rows.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> InMemoryTable {
        InMemoryTable::new(TableName::new("Order").unwrap())
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let table = table();
        table.put("o-1", json!({ "orderId": "o-1" })).await.unwrap();

        let item = table.get("o-1").await.unwrap();
        assert_eq!(item, Some(json!({ "orderId": "o-1" })));
        assert_eq!(table.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let table = table();
        assert!(table.get("nope").await.unwrap().is_none());
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_item() {
        let table = table();
        table.put("o-1", json!({ "v": 1 })).await.unwrap();
        table.put("o-1", json!({ "v": 2 })).await.unwrap();

        assert_eq!(table.len().await, 1);
        assert_eq!(table.get("o-1").await.unwrap(), Some(json!({ "v": 2 })));
    }

    #[tokio::test]
    async fn test_clones_share_rows() {
        let table = table();
        let other = table.clone();
        other.put("o-1", json!({})).await.unwrap();

        assert_eq!(table.len().await, 1);
        assert!(table.get("o-1").await.unwrap().is_some());
    }

    #[test]
    fn test_name() {
        assert_eq!(table().name().as_str(), "Order");
    }
}
