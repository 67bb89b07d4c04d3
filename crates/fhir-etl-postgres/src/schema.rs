//! Destination table DDL.
//!
//! Every destination table is a flat list of `VARCHAR` columns named and
//! ordered like the source [`FlatTable`]. Tables are created only when absent
//! and never altered.

use fhir_etl_core::FlatTable;
use sqlx_postgres::PgConnection;
use tracing::{debug, info, instrument};

use crate::error::{PostgresError, Result};

/// Quotes an SQL identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Comma-separated quoted column list.
pub(crate) fn column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `CREATE TABLE IF NOT EXISTS` statement for `table`.
#[must_use]
pub fn create_table_sql(table: &FlatTable) -> String {
    let columns = table
        .columns()
        .iter()
        .map(|c| format!("{} VARCHAR", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({columns})",
        quote_ident(table.name())
    )
}

/// Statement that empties `table` and resets its identity counters.
#[must_use]
pub fn truncate_sql(table_name: &str) -> String {
    format!("TRUNCATE TABLE {} RESTART IDENTITY", quote_ident(table_name))
}

/// Checks whether a table exists in the current schema.
pub async fn table_exists(conn: &mut PgConnection, table_name: &str) -> Result<bool> {
    let row: Option<(bool,)> = sqlx_core::query_as::query_as(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
        )",
    )
    .bind(table_name)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| PostgresError::schema(table_name, e))?;

    Ok(row.map(|(exists,)| exists).unwrap_or(false))
}

/// Creates the destination table if it does not exist yet.
///
/// Returns true when the table was created by this call.
#[instrument(skip_all, fields(table = %table.name()))]
pub async fn ensure_table(conn: &mut PgConnection, table: &FlatTable) -> Result<bool> {
    if table_exists(conn, table.name()).await? {
        debug!("Table already exists");
        return Ok(false);
    }

    sqlx_core::query::query(&create_table_sql(table))
        .execute(&mut *conn)
        .await
        .map_err(|e| PostgresError::schema(table.name(), e))?;

    info!(columns = table.columns().len(), "Created table");
    Ok(true)
}
