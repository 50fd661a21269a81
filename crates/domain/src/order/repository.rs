//! Persistence gateway for orders.

use async_trait::async_trait;
use common::OrderId;
use kv_store::{StoreError, Table};

use super::Order;

/// Durable storage for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Writes the order, keyed by its order ID.
    async fn save(&self, order: &Order) -> Result<(), StoreError>;

    /// Reads an order back by ID.
    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, StoreError>;
}

/// [`OrderRepository`] backed by a key-value table.
///
/// Each order is one item whose primary key is the order ID string.
/// Writes are plain puts with no condition attached.
#[derive(Clone)]
pub struct TableOrderRepository<T: Table> {
    table: T,
}

impl<T: Table> TableOrderRepository<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Returns a reference to the underlying table.
    pub fn table(&self) -> &T {
        &self.table
    }
}

#[async_trait]
impl<T: Table> OrderRepository for TableOrderRepository<T> {
    async fn save(&self, order: &Order) -> Result<(), StoreError> {
        let item = serde_json::to_value(order)?;
        self.table.put(&order.order_id().to_string(), item).await?;
        tracing::debug!(table = %self.table.name(), order_id = %order.order_id(), "order row written");
        Ok(())
    }

    async fn find(&self, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        match self.table.get(&order_id.to_string()).await? {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use kv_store::{InMemoryTable, TableName};

    use super::*;
    use crate::order::{CreateOrder, OrderItem};

    fn repository() -> TableOrderRepository<InMemoryTable> {
        TableOrderRepository::new(InMemoryTable::new(TableName::new("Order").unwrap()))
    }

    #[tokio::test]
    async fn test_save_writes_one_row_keyed_by_order_id() {
        let repository = repository();
        let order =
            Order::create(CreateOrder::new("c1", vec![OrderItem::new("p1", 2, 10.0)])).unwrap();

        repository.save(&order).await.unwrap();

        assert_eq!(repository.table().len().await, 1);
        let row = repository
            .table()
            .get(&order.order_id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row["orderId"], order.order_id().to_string());
        assert_eq!(row["customerId"], "c1");
    }

    #[tokio::test]
    async fn test_find_round_trips_saved_order() {
        let repository = repository();
        let order =
            Order::create(CreateOrder::new("c1", vec![OrderItem::new("p1", 1, 3.0)])).unwrap();
        repository.save(&order).await.unwrap();

        let found = repository.find(order.order_id()).await.unwrap();
        assert_eq!(found, Some(order));
        assert!(repository.find(OrderId::new()).await.unwrap().is_none());
    }
}
