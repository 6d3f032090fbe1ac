//! MongoDB document store adapter.

use crate::args::MongoOpts;
use crate::document::{
    age_above_filter, age_below_filter, document_to_record, id_filter, record_to_document,
    set_city_update,
};
use crate::error::MongoStoreError;
use bson::{doc, Document};
use jsonb_bench_record::Record;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Collection holding the benchmark documents.
pub const COLLECTION: &str = "json_records";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const INSERT_TIMEOUT: Duration = Duration::from_secs(30);
const READ_TIMEOUT: Duration = Duration::from_secs(5);
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Store adapter mapping records onto documents in a single collection.
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to MongoDB with bounded timeouts and verify liveness with
    /// an explicit ping before declaring success.
    pub async fn connect(opts: &MongoOpts) -> Result<Self, MongoStoreError> {
        let mut client_options = ClientOptions::parse(&opts.uri).await?;
        client_options.connect_timeout = Some(CONNECT_TIMEOUT);
        client_options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(client_options)?;
        let database = client.database(&opts.database);

        timeout(CONNECT_TIMEOUT, database.run_command(doc! { "ping": 1 }))
            .await
            .map_err(|_| MongoStoreError::Timeout("connect"))??;

        info!("Connected to MongoDB database '{}'", opts.database);

        Ok(Self { database })
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION)
    }

    /// Ensure the supporting indexes exist: a compound `(id, _id)` index
    /// for identifier lookups and a single-field `age` index for the
    /// range predicates. Re-creating an identical index is a no-op.
    pub async fn provision(&self) -> Result<(), MongoStoreError> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1, "_id": 1 })
            .options(IndexOptions::builder().name("idx_id_objectid".to_string()).build())
            .build();

        let age_index = IndexModel::builder()
            .keys(doc! { "age": 1 })
            .options(IndexOptions::builder().name("idx_age".to_string()).build())
            .build();

        timeout(
            CONNECT_TIMEOUT,
            self.collection().create_indexes(vec![id_index, age_index]),
        )
        .await
        .map_err(|_| MongoStoreError::Timeout("provision"))??;

        info!(
            "Provisioned collection '{}' with id and age indexes",
            COLLECTION
        );
        Ok(())
    }

    /// Insert the full batch as one unordered bulk operation, so one bad
    /// document does not abort the rest.
    ///
    /// Returns the number of documents inserted. An encode failure aborts
    /// the whole call before anything is written.
    pub async fn insert(&self, records: &[Record]) -> Result<u64, MongoStoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let documents: Vec<Document> = records
            .iter()
            .enumerate()
            .map(|(index, record)| record_to_document(record, index))
            .collect::<Result<_, _>>()?;

        let result = timeout(
            INSERT_TIMEOUT,
            self.collection().insert_many(documents).ordered(false),
        )
        .await
        .map_err(|_| MongoStoreError::Timeout("insert"))??;

        debug!("Inserted {} documents", result.inserted_ids.len());
        Ok(result.inserted_ids.len() as u64)
    }

    /// Find the single document whose `id` field matches.
    pub async fn find_by_id(&self, id: i64) -> Result<Record, MongoStoreError> {
        let document = timeout(READ_TIMEOUT, self.collection().find_one(id_filter(id)))
            .await
            .map_err(|_| MongoStoreError::Timeout("find_by_id"))??
            .ok_or(MongoStoreError::NotFound(id))?;

        document_to_record(document)
    }

    /// Set the nested city field for every document whose age is strictly
    /// greater than `min_age`, in one set-based update.
    ///
    /// Returns the number of documents modified.
    pub async fn update_city(&self, min_age: i64, city: &str) -> Result<u64, MongoStoreError> {
        let result = timeout(
            WRITE_TIMEOUT,
            self.collection()
                .update_many(age_above_filter(min_age), set_city_update(city)),
        )
        .await
        .map_err(|_| MongoStoreError::Timeout("update_city"))??;
        Ok(result.modified_count)
    }

    /// Delete every document whose age is below `max_age`, in one
    /// set-based delete. Deleting from an empty collection is a no-op.
    pub async fn delete_below_age(&self, max_age: i64) -> Result<u64, MongoStoreError> {
        let result = timeout(
            WRITE_TIMEOUT,
            self.collection().delete_many(age_below_filter(max_age)),
        )
        .await
        .map_err(|_| MongoStoreError::Timeout("delete_below_age"))??;
        Ok(result.deleted_count)
    }

    /// Drop the collection, for resetting the store between benchmark runs.
    pub async fn drop_collection(&self) -> Result<(), MongoStoreError> {
        timeout(WRITE_TIMEOUT, self.collection().drop())
            .await
            .map_err(|_| MongoStoreError::Timeout("drop_collection"))??;
        info!("Dropped collection '{}'", COLLECTION);
        Ok(())
    }

    /// Current document count.
    pub async fn document_count(&self) -> Result<u64, MongoStoreError> {
        let count = timeout(READ_TIMEOUT, self.collection().count_documents(doc! {}))
            .await
            .map_err(|_| MongoStoreError::Timeout("document_count"))??;
        Ok(count)
    }
}
