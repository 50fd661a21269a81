//! Order aggregate and related types.

mod aggregate;
mod commands;
mod repository;
mod service;
mod value_objects;

pub use aggregate::Order;
pub use commands::CreateOrder;
pub use repository::{OrderRepository, TableOrderRepository};
pub use service::OrderService;
pub use value_objects::{CustomerId, OrderItem, ProductId};
