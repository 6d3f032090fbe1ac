//! PostgreSQL JSONB store adapter.

use crate::args::PostgresOpts;
use crate::error::PostgresStoreError;
use crate::insert::{build_insert_sql, encode_records, DEFAULT_BATCH_SIZE};
use jsonb_bench_record::Record;
use std::time::Duration;
use tokio::time::timeout;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info};

/// Table holding the JSONB payloads.
pub const TABLE: &str = "json_records";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const INSERT_TIMEOUT: Duration = Duration::from_secs(30);
const READ_TIMEOUT: Duration = Duration::from_secs(5);
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// A persisted record: the surrogate key plus the decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Auto-incrementing surrogate key, not part of the payload.
    pub key: i64,
    pub record: Record,
}

/// Store adapter mapping records onto rows of a single JSONB-payload table.
pub struct PostgresStore {
    client: Client,
    batch_size: usize,
}

impl PostgresStore {
    /// Connect to PostgreSQL and verify liveness with `SELECT 1`.
    pub async fn connect(opts: &PostgresOpts) -> Result<Self, PostgresStoreError> {
        let (client, connection) = timeout(
            CONNECT_TIMEOUT,
            tokio_postgres::connect(&opts.connection_string(), NoTls),
        )
        .await
        .map_err(|_| PostgresStoreError::Timeout("connect"))??;

        // Drive the connection on its own task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        timeout(CONNECT_TIMEOUT, client.simple_query("SELECT 1"))
            .await
            .map_err(|_| PostgresStoreError::Timeout("connect"))??;

        info!("Connected to PostgreSQL at {}:{}", opts.host, opts.port);

        Ok(Self {
            client,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Set the chunk size for bulk inserts.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Ensure the payload table and its expression indexes exist.
    ///
    /// Safe to call repeatedly; every statement is `IF NOT EXISTS`.
    pub async fn provision(&self) -> Result<(), PostgresStoreError> {
        let ddl = [
            format!(
                "CREATE TABLE IF NOT EXISTS \"{TABLE}\" (id BIGSERIAL PRIMARY KEY, data JSONB NOT NULL)"
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{TABLE}_id ON \"{TABLE}\" ((data->>'id'), id)"
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{TABLE}_age ON \"{TABLE}\" (((data->>'age')::int))"
            ),
        ];

        for sql in &ddl {
            debug!("DDL: {}", sql);
            timeout(CONNECT_TIMEOUT, self.client.execute(sql.as_str(), &[]))
                .await
                .map_err(|_| PostgresStoreError::Timeout("provision"))??;
        }

        info!("Provisioned table '{}' with id and age indexes", TABLE);
        Ok(())
    }

    /// Bulk-insert records in bounded-size chunks.
    ///
    /// Returns the number of rows inserted. An encode failure aborts the
    /// whole call before anything is written.
    pub async fn insert(&self, records: &[Record]) -> Result<u64, PostgresStoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let payloads = encode_records(records)?;

        let mut inserted = 0u64;
        for chunk in payloads.chunks(self.batch_size) {
            let sql = build_insert_sql(TABLE, chunk.len());
            let params: Vec<&(dyn ToSql + Sync)> =
                chunk.iter().map(|v| v as &(dyn ToSql + Sync)).collect();

            timeout(INSERT_TIMEOUT, self.client.execute(&sql, &params))
                .await
                .map_err(|_| PostgresStoreError::Timeout("insert"))??;

            inserted += chunk.len() as u64;
            debug!("Inserted chunk of {} rows ({} total)", chunk.len(), inserted);
        }

        Ok(inserted)
    }

    /// Find the single row whose embedded `id` field matches.
    ///
    /// `data->>'id'` is text, so the identifier is compared stringified;
    /// the lookup is served by the id expression index.
    pub async fn find_by_id(&self, id: i64) -> Result<StoredRecord, PostgresStoreError> {
        let sql = format!("SELECT id, data FROM \"{TABLE}\" WHERE data->>'id' = $1 LIMIT 1");
        let row = timeout(
            READ_TIMEOUT,
            self.client.query_opt(&sql, &[&id.to_string()]),
        )
        .await
        .map_err(|_| PostgresStoreError::Timeout("find_by_id"))??
        .ok_or(PostgresStoreError::NotFound(id))?;

        let key: i64 = row.get(0);
        let payload: serde_json::Value = row.get(1);
        let record = serde_json::from_value(payload).map_err(PostgresStoreError::Decode)?;

        Ok(StoredRecord { key, record })
    }

    /// Set the embedded city for every row whose embedded age is strictly
    /// greater than `min_age`, in one set-based UPDATE.
    ///
    /// Returns the number of rows updated.
    pub async fn update_city(&self, min_age: i64, city: &str) -> Result<u64, PostgresStoreError> {
        let sql = format!(
            "UPDATE \"{TABLE}\" \
             SET data = jsonb_set(data, '{{address,city}}', to_jsonb($1::text), false) \
             WHERE (data->>'age')::int > $2"
        );
        let min_age = min_age as i32;
        let updated = timeout(WRITE_TIMEOUT, self.client.execute(&sql, &[&city, &min_age]))
            .await
            .map_err(|_| PostgresStoreError::Timeout("update_city"))??;
        Ok(updated)
    }

    /// Delete every row whose embedded age is below `max_age`, in one
    /// set-based DELETE. Deleting from an empty table is a no-op.
    pub async fn delete_below_age(&self, max_age: i64) -> Result<u64, PostgresStoreError> {
        let sql = format!("DELETE FROM \"{TABLE}\" WHERE (data->>'age')::int < $1");
        let max_age = max_age as i32;
        let deleted = timeout(WRITE_TIMEOUT, self.client.execute(&sql, &[&max_age]))
            .await
            .map_err(|_| PostgresStoreError::Timeout("delete_below_age"))??;
        Ok(deleted)
    }

    /// Delete all rows, for resetting the store between benchmark runs.
    pub async fn truncate(&self) -> Result<(), PostgresStoreError> {
        let sql = format!("TRUNCATE TABLE \"{TABLE}\"");
        timeout(WRITE_TIMEOUT, self.client.execute(&sql, &[]))
            .await
            .map_err(|_| PostgresStoreError::Timeout("truncate"))??;
        info!("Truncated table '{}'", TABLE);
        Ok(())
    }

    /// Current row count.
    pub async fn row_count(&self) -> Result<u64, PostgresStoreError> {
        let sql = format!("SELECT COUNT(*) FROM \"{TABLE}\"");
        let row = timeout(READ_TIMEOUT, self.client.query_one(&sql, &[]))
            .await
            .map_err(|_| PostgresStoreError::Timeout("row_count"))??;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }
}
