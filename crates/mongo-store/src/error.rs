//! Error types for the MongoDB store.

use thiserror::Error;

/// Errors that can occur in the MongoDB store adapter.
#[derive(Error, Debug)]
pub enum MongoStoreError {
    /// MongoDB driver error.
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A record could not be encoded to BSON. Aborts the enclosing bulk
    /// insert and identifies the offending element.
    #[error("failed to encode record at index {index}: {source}")]
    Encode {
        index: usize,
        #[source]
        source: bson::ser::Error,
    },

    /// A stored document could not be decoded back into a record.
    #[error("failed to decode stored document: {0}")]
    Decode(#[from] bson::de::Error),

    /// No document matched the identifier.
    #[error("no record with id {0}")]
    NotFound(i64),

    /// The per-call timeout elapsed.
    #[error("MongoDB operation '{0}' timed out")]
    Timeout(&'static str),
}
