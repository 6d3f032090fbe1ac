//! The canonical benchmark record.

use serde::{Deserialize, Serialize};

/// Nested address object embedded in every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

/// The unit of benchmarking data.
///
/// Identifiers are unique and contiguous within one generated batch
/// (1..=N); there is no cross-batch uniqueness guarantee. Records are
/// never mutated in memory after generation. Store-side mutations are
/// addressed by query predicate, not by object reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub address: Address,
    pub tags: Vec<String>,
}
