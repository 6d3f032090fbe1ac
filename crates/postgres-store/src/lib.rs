//! PostgreSQL JSONB store adapter for jsonb-bench.
//!
//! Records are persisted as rows of `json_records(id BIGSERIAL, data JSONB)`:
//! an auto-incrementing surrogate key plus the full record as a JSONB payload.
//! All lookups and predicates address fields embedded in the payload
//! (`data->>'id'`, `(data->>'age')::int`), never the surrogate key.

pub mod args;
pub mod error;
pub mod insert;
pub mod store;

pub use args::PostgresOpts;
pub use error::PostgresStoreError;
pub use store::{PostgresStore, StoredRecord};
