//! PostgreSQL bulk loader for fhir-etl flat tables.
//!
//! Each [`FlatTable`](fhir_etl_core::FlatTable) replaces the full contents of
//! a same-named destination table:
//!
//! 1. `CREATE TABLE IF NOT EXISTS` with one `VARCHAR` column per source column
//! 2. `TRUNCATE ... RESTART IDENTITY`
//! 3. `COPY ... FROM STDIN` with the rows encoded as headerless CSV
//!
//! Steps 2 and 3 share a transaction, so a failed copy leaves the previous
//! rows in place.
//!
//! # Example
//!
//! ```ignore
//! use fhir_etl_postgres::{BulkLoader, PostgresConfig};
//!
//! let config = PostgresConfig::new("localhost", "fhir", "postgres").with_password("secret");
//! let loader = BulkLoader::new(config);
//! for load in loader.load_all(&tables.into_vec()).await? {
//!     println!("{load:?}");
//! }
//! ```

mod config;
mod connection;
mod copy;
mod error;
mod loader;
mod schema;

pub use config::PostgresConfig;
pub use connection::{close, connect};
pub use copy::{COPY_CHUNK_SIZE, copy_statement, encode_csv};
pub use error::{PostgresError, Result, pg_error_code};
pub use loader::{BulkLoader, TableLoad};
pub use schema::{create_table_sql, ensure_table, quote_ident, table_exists, truncate_sql};
