//! Domain layer for the order service.
//!
//! This crate provides:
//! - the Order aggregate and its value objects
//! - the CreateOrder command and its invariant checks
//! - OrderRepository, the persistence gateway, with a key-value table backend
//! - OrderService, the creation use case

pub mod order;

pub use order::{
    CreateOrder, CustomerId, Order, OrderItem, OrderRepository, OrderService, ProductId,
    TableOrderRepository,
};
