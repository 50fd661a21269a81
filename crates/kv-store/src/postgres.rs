use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{Result, StoreError, Table, TableName};

/// SQLSTATE raised by PostgreSQL for a reference to a missing relation.
const UNDEFINED_TABLE: &str = "42P01";

/// Longest identifier PostgreSQL keeps without truncation.
const MAX_IDENTIFIER_LEN: usize = 63;

/// PostgreSQL-backed key-value table.
///
/// Each table is a relation with a text primary key and a JSONB item column.
#[derive(Clone)]
pub struct PostgresTable {
    pool: PgPool,
    name: TableName,
    create_sql: String,
    put_sql: String,
    get_sql: String,
}

impl PostgresTable {
    /// Creates a handle to the table `name` reachable through `pool`.
    ///
    /// Does not touch the database; call [`PostgresTable::ensure_exists`] to
    /// create the relation.
    pub fn new(pool: PgPool, name: TableName) -> Result<Self> {
        if name.as_str().len() > MAX_IDENTIFIER_LEN {
            return Err(StoreError::InvalidTableName {
                name: name.to_string(),
                reason: "must be at most 63 characters for PostgreSQL",
            });
        }

        // TableName only admits [A-Za-z0-9_.-], so quoting is sufficient.
        let ident = format!("\"{}\"", name.as_str());

        Ok(Self {
            pool,
            create_sql: format!(
                r#"
                CREATE TABLE IF NOT EXISTS {ident} (
                    key TEXT PRIMARY KEY,
                    item JSONB NOT NULL,
                    written_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )
                "#
            ),
            put_sql: format!(
                r#"
                INSERT INTO {ident} (key, item)
                VALUES ($1, $2)
                ON CONFLICT (key) DO UPDATE SET item = EXCLUDED.item, written_at = now()
                "#
            ),
            get_sql: format!("SELECT item FROM {ident} WHERE key = $1"),
            name,
        })
    }

    /// Creates the backing relation if it does not exist yet.
    pub async fn ensure_exists(&self) -> Result<()> {
        sqlx::query(&self.create_sql).execute(&self.pool).await?;
        tracing::info!(table = %self.name, "key-value table ready");
        Ok(())
    }

    fn map_error(&self, e: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.code().as_deref() == Some(UNDEFINED_TABLE)
        {
            return StoreError::TableNotFound(self.name.to_string());
        }
        StoreError::Database(e)
    }
}

#[async_trait]
impl Table for PostgresTable {
    fn name(&self) -> &TableName {
        &self.name
    }

    async fn put(&self, key: &str, item: Value) -> Result<()> {
        sqlx::query(&self.put_sql)
            .bind(key)
            .bind(item)
            .execute(&self.pool)
            .await
            .map_err(|e| self.map_error(e))?;

        metrics::counter!("kv_store_puts_total", "table" => self.name.to_string()).increment(1);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        sqlx::query_scalar::<_, Value>(&self.get_sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.map_error(e))
    }
}
