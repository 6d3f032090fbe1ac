//! Record/BSON conversion and filter construction.

use crate::error::MongoStoreError;
use bson::{doc, Document};
use jsonb_bench_record::Record;

/// Encode a record into a BSON document, reporting the element's position
/// in the enclosing batch on failure.
pub fn record_to_document(record: &Record, index: usize) -> Result<Document, MongoStoreError> {
    bson::to_document(record).map_err(|source| MongoStoreError::Encode { index, source })
}

/// Decode a stored document back into a record.
///
/// The driver-assigned `_id` field is ignored by deserialization.
pub fn document_to_record(document: Document) -> Result<Record, MongoStoreError> {
    Ok(bson::from_document(document)?)
}

/// Filter matching a single record by its `id` field.
pub fn id_filter(id: i64) -> Document {
    doc! { "id": id }
}

/// Filter matching documents with age strictly above the threshold.
pub fn age_above_filter(min_age: i64) -> Document {
    doc! { "age": { "$gt": min_age } }
}

/// Filter matching documents with age below the threshold.
pub fn age_below_filter(max_age: i64) -> Document {
    doc! { "age": { "$lt": max_age } }
}

/// Update setting the nested city field.
pub fn set_city_update(city: &str) -> Document {
    doc! { "$set": { "address.city": city } }
}
