//! Connection lifecycle.
//!
//! The loader holds one connection per table load and closes it when the
//! load is done, whatever the outcome.

use sqlx_core::connection::Connection;
use sqlx_postgres::PgConnection;
use tracing::{debug, instrument, warn};

use crate::config::PostgresConfig;
use crate::error::Result;

/// Opens a single connection.
#[instrument(skip(config), fields(url = %config.display_url()))]
pub async fn connect(config: &PostgresConfig) -> Result<PgConnection> {
    config.validate()?;

    let conn = PgConnection::connect_with(&config.connect_options()).await?;

    debug!("PostgreSQL connection opened");

    Ok(conn)
}

/// Closes a connection gracefully.
///
/// A connection that is already broken cannot be closed cleanly; it is
/// dropped and the failure logged.
pub async fn close(conn: PgConnection) {
    match conn.close().await {
        Ok(()) => debug!("PostgreSQL connection closed"),
        Err(e) => warn!(error = %e, "Failed to close PostgreSQL connection cleanly"),
    }
}
