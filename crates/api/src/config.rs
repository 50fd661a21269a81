//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `ORDER_API_ORIGIN` — value of `Access-Control-Allow-Origin` (default: `"*"`)
/// - `ORDER_TABLE_NAME` — key-value table holding orders (default: `"Order"`)
/// - `DATABASE_URL` — PostgreSQL URL; in-memory table when unset
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub allowed_origin: String,
    pub table_name: String,
    pub database_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing keys and unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            allowed_origin: lookup("ORDER_API_ORIGIN").unwrap_or(defaults.allowed_origin),
            table_name: lookup("ORDER_TABLE_NAME").unwrap_or(defaults.table_name),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            allowed_origin: "*".to_string(),
            table_name: "Order".to_string(),
            database_url: None,
        }
    }
}
