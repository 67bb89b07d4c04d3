//! Error types for the bulk loader.

use sqlx_core::error::Error as SqlxError;

/// Returns the PostgreSQL SQLSTATE code carried by a sqlx error, if any.
pub fn pg_error_code(err: &SqlxError) -> Option<String> {
    if let SqlxError::Database(db_err) = err {
        db_err.code().map(|code| code.into_owned())
    } else {
        None
    }
}

/// Errors that abort a load run.
///
/// A failed bulk copy is not an error at this level; it is reported as
/// [`crate::TableLoad::Failed`] so the remaining tables are still loaded.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] SqlxError),

    /// Creating or inspecting a destination table failed.
    #[error("Failed to prepare table {table}: {source}")]
    Schema {
        table: String,
        #[source]
        source: SqlxError,
    },

    /// Encoding rows for COPY failed.
    #[error("Failed to encode rows: {0}")]
    Encode(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PostgresError {
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn schema(table: impl Into<String>, source: SqlxError) -> Self {
        Self::Schema {
            table: table.into(),
            source,
        }
    }
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, PostgresError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostgresError::config("invalid host");
        assert!(err.to_string().contains("Configuration error"));

        let err = PostgresError::schema("patient", SqlxError::RowNotFound);
        assert!(err.to_string().contains("patient"));
    }

    #[test]
    fn test_non_database_error_has_no_code() {
        assert_eq!(pg_error_code(&SqlxError::RowNotFound), None);
    }
}
