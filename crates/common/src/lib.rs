//! Shared types for the order service.
//!
//! - [`OrderId`]: server-generated order identifier
//! - [`AppError`]: tagged union of application failures, returned instead of
//!   raised and translated to a response at the HTTP boundary

pub mod error;
pub mod types;

pub use error::{AppError, AppResult, ErrorResponse, ValidationError};
pub use types::OrderId;
