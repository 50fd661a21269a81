pub mod error;
pub mod memory;
pub mod postgres;
pub mod table;

pub use error::{Result, StoreError};
pub use memory::InMemoryTable;
pub use postgres::PostgresTable;
pub use table::{Table, TableName};
