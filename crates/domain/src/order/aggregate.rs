//! Order aggregate.

use chrono::{DateTime, Utc};
use common::{AppError, AppResult, OrderId};
use serde::{Deserialize, Serialize};

use super::{CreateOrder, CustomerId, OrderItem};

/// A customer's purchase request.
///
/// Built once from a [`CreateOrder`] command and never mutated afterwards;
/// the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    order_id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Builds a new order with a freshly generated ID.
    ///
    /// Fails with [`AppError::Validation`] if the command breaks an order
    /// invariant.
    pub fn create(cmd: CreateOrder) -> AppResult<Self> {
        AppError::check(cmd.violations())?;

        Ok(Self {
            order_id: OrderId::new(),
            customer_id: cmd.customer_id,
            items: cmd.items,
            created_at: Utc::now(),
        })
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of all line totals.
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> CreateOrder {
        CreateOrder::new(
            "c1",
            vec![OrderItem::new("p1", 2, 10.0), OrderItem::new("p2", 1, 4.5)],
        )
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let first = Order::create(sample_command()).unwrap();
        let second = Order::create(sample_command()).unwrap();

        assert_ne!(first.order_id(), second.order_id());
        assert_eq!(first.customer_id().as_str(), "c1");
        assert_eq!(first.item_count(), 2);
    }

    #[test]
    fn test_total() {
        let order = Order::create(sample_command()).unwrap();
        assert_eq!(order.total(), 24.5);
    }

    #[test]
    fn test_create_rejects_invalid_command() {
        let err = Order::create(CreateOrder::new("", vec![])).unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_serialized_shape() {
        let order = Order::create(sample_command()).unwrap();
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["orderId"], order.order_id().to_string());
        assert_eq!(json["customerId"], "c1");
        assert_eq!(json["items"][0]["productId"], "p1");
        assert!(json["createdAt"].is_string());

        let restored: Order = serde_json::from_value(json).unwrap();
        assert_eq!(restored, order);
    }
}
