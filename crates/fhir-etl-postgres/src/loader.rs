//! Full-replace bulk loading of flat tables.

use fhir_etl_core::FlatTable;
use sqlx_core::connection::Connection;
use sqlx_core::error::Error as SqlxError;
use sqlx_postgres::PgConnection;
use tracing::{error, info, instrument};

use crate::config::PostgresConfig;
use crate::connection;
use crate::copy::{COPY_CHUNK_SIZE, copy_statement, encode_csv};
use crate::error::{Result, pg_error_code};
use crate::schema::{ensure_table, truncate_sql};

/// Outcome of loading one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLoad {
    /// The table now holds exactly `rows` rows.
    Loaded { table: String, rows: u64 },
    /// The copy failed; the table keeps the rows it had before the run.
    Failed { table: String, reason: String },
}

impl TableLoad {
    pub fn table(&self) -> &str {
        match self {
            TableLoad::Loaded { table, .. } | TableLoad::Failed { table, .. } => table,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, TableLoad::Loaded { .. })
    }
}

/// Replaces the contents of destination tables with flat tables.
#[derive(Debug, Clone)]
pub struct BulkLoader {
    config: PostgresConfig,
}

impl BulkLoader {
    #[must_use]
    pub fn new(config: PostgresConfig) -> Self {
        Self { config }
    }

    /// Loads one table over its own connection.
    ///
    /// The destination table is created when absent, then emptied and
    /// refilled in a single transaction. A failure while emptying or copying
    /// is logged and returned as [`TableLoad::Failed`]. Connection and DDL
    /// failures are returned as errors.
    #[instrument(skip_all, fields(table = %table.name(), rows = table.len()))]
    pub async fn load_table(&self, table: &FlatTable) -> Result<TableLoad> {
        let mut conn = connection::connect(&self.config).await?;
        let result = replace_rows(&mut conn, table).await;
        connection::close(conn).await;
        result
    }

    /// Loads every table in order, continuing past failed copies.
    pub async fn load_all(&self, tables: &[FlatTable]) -> Result<Vec<TableLoad>> {
        let mut loads = Vec::with_capacity(tables.len());
        for table in tables {
            loads.push(self.load_table(table).await?);
        }
        Ok(loads)
    }
}

async fn replace_rows(conn: &mut PgConnection, table: &FlatTable) -> Result<TableLoad> {
    ensure_table(conn, table).await?;

    let payload = match encode_csv(table) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Failed to encode rows for COPY");
            return Ok(TableLoad::Failed {
                table: table.name().to_string(),
                reason: e.to_string(),
            });
        }
    };

    match copy_rows(conn, table, &payload).await {
        Ok(rows) => {
            info!(rows, "Loaded table");
            Ok(TableLoad::Loaded {
                table: table.name().to_string(),
                rows,
            })
        }
        Err(e) => {
            error!(
                error = %e,
                code = pg_error_code(&e).as_deref().unwrap_or("-"),
                "Bulk load failed, keeping previous rows"
            );
            Ok(TableLoad::Failed {
                table: table.name().to_string(),
                reason: e.to_string(),
            })
        }
    }
}

async fn copy_rows(
    conn: &mut PgConnection,
    table: &FlatTable,
    payload: &[u8],
) -> std::result::Result<u64, SqlxError> {
    let mut tx = conn.begin().await?;

    sqlx_core::query::query(&truncate_sql(table.name()))
        .execute(&mut *tx)
        .await?;

    let mut copy = tx.copy_in_raw(&copy_statement(table)).await?;
    for chunk in payload.chunks(COPY_CHUNK_SIZE) {
        copy.send(chunk).await?;
    }
    let rows = copy.finish().await?;

    tx.commit().await?;
    Ok(rows)
}
