//! Order service providing the creation use case.

use common::{AppError, AppResult, OrderId};

use super::{CreateOrder, Order, OrderRepository};

/// Service for creating orders.
///
/// Holds no state of its own beyond the repository, so one instance can
/// serve any number of concurrent requests.
pub struct OrderService<R: OrderRepository> {
    repository: R,
}

impl<R: OrderRepository> OrderService<R> {
    /// Creates a new order service writing through the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Builds an order from the command and writes it exactly once.
    ///
    /// Storage failures are returned as [`AppError::Internal`] tagged
    /// `"repository"`; nothing is retried.
    #[tracing::instrument(skip(self, cmd), fields(customer_id = %cmd.customer_id))]
    pub async fn create(&self, cmd: CreateOrder) -> AppResult<Order> {
        let order = Order::create(cmd)?;

        self.repository
            .save(&order)
            .await
            .map_err(|e| AppError::internal("repository", e))?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(
            order_id = %order.order_id(),
            items = order.item_count(),
            total = order.total(),
            "order created"
        );

        Ok(order)
    }

    /// Loads a previously created order.
    #[tracing::instrument(skip(self))]
    pub async fn find(&self, order_id: OrderId) -> AppResult<Order> {
        self.repository
            .find(order_id)
            .await
            .map_err(|e| AppError::internal("repository", e))?
            .ok_or_else(|| AppError::not_found("order", order_id))
    }
}
