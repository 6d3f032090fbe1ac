//! Batched INSERT construction for the JSONB payload table.

use crate::error::PostgresStoreError;
use jsonb_bench_record::Record;

/// Default number of rows per INSERT round trip.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Build a multi-row INSERT statement with one JSONB placeholder per row.
pub fn build_insert_sql(table: &str, row_count: usize) -> String {
    let placeholders: Vec<String> = (1..=row_count).map(|i| format!("(${i})")).collect();
    format!(
        "INSERT INTO \"{table}\" (data) VALUES {}",
        placeholders.join(", ")
    )
}

/// Encode a batch of records into JSONB payload values.
///
/// An encode failure aborts the whole batch and reports the position of
/// the offending record; nothing is silently dropped.
pub fn encode_records(records: &[Record]) -> Result<Vec<serde_json::Value>, PostgresStoreError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::to_value(record)
                .map_err(|source| PostgresStoreError::Encode { index, source })
        })
        .collect()
}
