//! Error types for the PostgreSQL store.

use thiserror::Error;

/// Errors that can occur in the PostgreSQL store adapter.
#[derive(Error, Debug)]
pub enum PostgresStoreError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// A record could not be encoded to JSON. Aborts the enclosing bulk
    /// insert and identifies the offending element.
    #[error("failed to encode record at index {index}: {source}")]
    Encode {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A stored JSONB payload could not be decoded back into a record.
    #[error("failed to decode stored payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// No row matched the embedded identifier.
    #[error("no record with id {0}")]
    NotFound(i64),

    /// The per-call timeout elapsed.
    #[error("PostgreSQL operation '{0}' timed out")]
    Timeout(&'static str),
}
