use thiserror::Error;

/// Errors that can occur when interacting with a key-value table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing table does not exist.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The configured table name cannot be used.
    #[error("Invalid table name {name:?}: {reason}")]
    InvalidTableName { name: String, reason: &'static str },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for key-value table operations.
pub type Result<T> = std::result::Result<T, StoreError>;
