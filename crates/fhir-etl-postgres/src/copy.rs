//! CSV payloads for `COPY ... FROM STDIN`.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use fhir_etl_core::FlatTable;

use crate::error::Result;
use crate::schema::{column_list, quote_ident};

/// Maximum bytes sent per COPY data message.
pub const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// `COPY` statement reading headerless CSV with empty fields as NULL.
#[must_use]
pub fn copy_statement(table: &FlatTable) -> String {
    format!(
        "COPY {} ({}) FROM STDIN WITH (FORMAT csv, DELIMITER ',', NULL '')",
        quote_ident(table.name()),
        column_list(table.columns())
    )
}

/// Serializes all rows of `table` as headerless CSV.
pub fn encode_csv(table: &FlatTable) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in table.rows() {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}
