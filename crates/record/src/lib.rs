//! Canonical record model and data generator for jsonb-bench.
//!
//! Both store adapters persist the same `Record` type: the PostgreSQL adapter
//! encodes it into a JSONB payload column, the MongoDB adapter into a BSON
//! document. Records cross the store boundary as this typed struct, never as
//! an untyped map.

pub mod generator;
pub mod record;

// Re-exports for convenience
pub use generator::RecordGenerator;
pub use record::{Address, Record};
