use async_trait::async_trait;
use serde_json::Value;

use crate::{Result, StoreError};

/// Name of a key-value table.
///
/// Follows the managed key-value naming rules: 3 to 255 characters drawn
/// from `A-Z`, `a-z`, `0-9`, `_`, `-` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 255;

    /// Validates and wraps a table name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.len() < Self::MIN_LEN || name.len() > Self::MAX_LEN {
            return Err(StoreError::InvalidTableName {
                name,
                reason: "must be between 3 and 255 characters",
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(StoreError::InvalidTableName {
                name,
                reason: "may only contain letters, digits, '_', '-' and '.'",
            });
        }

        Ok(Self(name))
    }

    /// Returns the table name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A table of JSON items addressed by a string primary key.
///
/// Writes are unconditional: `put` replaces any item already stored
/// under the same key. All implementations must be thread-safe.
#[async_trait]
pub trait Table: Send + Sync {
    /// Returns the name of the table.
    fn name(&self) -> &TableName;

    /// Stores `item` under `key`.
    async fn put(&self, key: &str, item: Value) -> Result<()>;

    /// Fetches the item stored under `key`.
    ///
    /// Returns None if no item exists for the key.
    async fn get(&self, key: &str) -> Result<Option<Value>>;
}
