//! MongoDB document store adapter for jsonb-bench.
//!
//! Records are persisted as documents in a single collection, with the
//! record's own fields as the document body. The driver-assigned `_id` is
//! never exposed to callers; all lookups and predicates address the
//! record's `id` and `age` fields.

pub mod args;
pub mod document;
pub mod error;
pub mod store;

pub use args::MongoOpts;
pub use error::MongoStoreError;
pub use store::MongoStore;
