//! PostgreSQL store integration tests.
//!
//! These exercise a live PostgreSQL server and are ignored by default.
//! Run them against a local instance with:
//!
//! ```bash
//! POSTGRES_HOST=localhost POSTGRES_USER=postgres POSTGRES_PASSWORD=postgres \
//! POSTGRES_DB=benchdb cargo test --test postgres_store -- --ignored
//! ```

use jsonb_bench_postgres::{PostgresOpts, PostgresStore, PostgresStoreError};
use jsonb_bench_record::{Address, Record, RecordGenerator};

fn opts_from_env() -> PostgresOpts {
    PostgresOpts {
        host: std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string()),
        user: std::env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string()),
        password: std::env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
        database: std::env::var("POSTGRES_DB").unwrap_or_else(|_| "benchdb".to_string()),
        port: std::env::var("POSTGRES_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5432),
    }
}

async fn clean_store() -> Result<PostgresStore, Box<dyn std::error::Error>> {
    let store = PostgresStore::connect(&opts_from_env()).await?;
    store.provision().await?;
    store.truncate().await?;
    Ok(store)
}

fn record(id: i64, age: i64, city: &str) -> Record {
    Record {
        id,
        name: format!("User {id}"),
        age,
        address: Address {
            city: city.to_string(),
            zip: (380_000 + id).to_string(),
        },
        tags: vec!["bench".to_string(), "json".to_string(), "crud".to_string()],
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_provision_twice_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let store = PostgresStore::connect(&opts_from_env()).await?;
    store.provision().await?;
    store.provision().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_insert_and_find_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let store = clean_store().await?;

    let records = RecordGenerator::new(42).generate(25);
    let inserted = store.insert(&records).await?;
    assert_eq!(inserted, 25);
    assert_eq!(store.row_count().await?, 25);

    for expected in &records {
        let stored = store.find_by_id(expected.id).await?;
        assert_eq!(&stored.record, expected);
    }

    assert!(matches!(
        store.find_by_id(9999).await,
        Err(PostgresStoreError::NotFound(9999))
    ));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_insert_chunks_batches() -> Result<(), Box<dyn std::error::Error>> {
    let store = clean_store().await?.with_batch_size(10);

    let records = RecordGenerator::new(7).generate(35);
    assert_eq!(store.insert(&records).await?, 35);
    assert_eq!(store.row_count().await?, 35);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_update_and_delete_predicates() -> Result<(), Box<dyn std::error::Error>> {
    let store = clean_store().await?;

    let records: Vec<Record> = [25, 35, 45, 55, 65]
        .iter()
        .enumerate()
        .map(|(i, &age)| record(i as i64 + 1, age, "City0"))
        .collect();
    store.insert(&records).await?;

    // Update is strictly greater-than: ages 45/55/65 change, 25/35 do not
    let updated = store.update_city(40, "X").await?;
    assert_eq!(updated, 3);

    for r in &records {
        let stored = store.find_by_id(r.id).await?;
        if r.age > 40 {
            assert_eq!(stored.record.address.city, "X");
        } else {
            assert_eq!(stored.record.address.city, r.address.city);
        }
        // Everything else is untouched
        assert_eq!(stored.record.age, r.age);
        assert_eq!(stored.record.name, r.name);
    }

    // Delete below 30 removes only the age-25 record
    let deleted = store.delete_below_age(30).await?;
    assert_eq!(deleted, 1);
    assert_eq!(store.row_count().await?, 4);
    assert!(matches!(
        store.find_by_id(1).await,
        Err(PostgresStoreError::NotFound(1))
    ));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_delete_on_empty_store_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let store = clean_store().await?;
    assert_eq!(store.delete_below_age(100).await?, 0);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_insert_empty_batch_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let store = clean_store().await?;
    assert_eq!(store.insert(&[]).await?, 0);
    assert_eq!(store.row_count().await?, 0);
    Ok(())
}
