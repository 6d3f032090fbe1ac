//! Benchmark runner driving both store adapters through an identical
//! operation sequence.
//!
//! Operations run strictly one at a time; each is timed with a monotonic
//! clock. A failed step is recorded with its error and the run continues,
//! so a report always carries all eight measurements.

use jsonb_bench_mongo::MongoStore;
use jsonb_bench_postgres::PostgresStore;
use jsonb_bench_record::RecordGenerator;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Which backing store a measurement was taken against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Mongo,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Postgres => write!(f, "postgresql"),
            StoreKind::Mongo => write!(f, "mongodb"),
        }
    }
}

/// The benchmarked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Find,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert => write!(f, "insert"),
            Operation::Find => write!(f, "find"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Benchmark parameters. Defaults match the classic harness constants.
#[derive(Debug, Clone)]
pub struct BenchOptions {
    /// Number of records to generate and insert.
    pub record_count: u64,
    /// Identifier used for the point-read step.
    pub lookup_id: i64,
    /// Age threshold for the update step (strictly greater than).
    pub update_min_age: i64,
    /// City written by the update step.
    pub update_city: String,
    /// Age threshold for the delete step (strictly less than).
    pub delete_max_age: i64,
    /// Seed for the record generator.
    pub seed: u64,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            record_count: 10_000,
            lookup_id: 10,
            update_min_age: 30,
            update_city: "BenchCity".to_string(),
            delete_max_age: 20,
            seed: 42,
        }
    }
}

/// One timed operation against one store.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub store: StoreKind,
    pub operation: Operation,
    pub duration: Duration,
    /// Rows/documents affected, when the operation reports it.
    pub rows: Option<u64>,
    /// Error description when the operation failed.
    pub error: Option<String>,
}

impl Measurement {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Rows per second, for operations that report an affected count.
    pub fn rows_per_second(&self) -> Option<f64> {
        let rows = self.rows?;
        if self.duration.as_secs_f64() > 0.0 {
            Some(rows as f64 / self.duration.as_secs_f64())
        } else {
            None
        }
    }
}

/// The full benchmark outcome: one measurement per store per operation.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub record_count: u64,
    pub measurements: Vec<Measurement>,
}

impl BenchReport {
    pub fn failures(&self) -> usize {
        self.measurements.iter().filter(|m| !m.succeeded()).count()
    }

    /// Render the human-readable summary table.
    pub fn render(&self) -> String {
        let mut out = format!("Benchmark results over {} records:\n", self.record_count);
        for m in &self.measurements {
            match &m.error {
                None => {
                    let rate = m
                        .rows_per_second()
                        .map(|r| format!(" ({r:.0} rows/sec)"))
                        .unwrap_or_default();
                    out.push_str(&format!(
                        "  {:<10} {:<7} {:>12.3?}{}\n",
                        m.store.to_string(),
                        m.operation.to_string(),
                        m.duration,
                        rate
                    ));
                }
                Some(error) => {
                    out.push_str(&format!(
                        "  {:<10} {:<7} FAILED: {}\n",
                        m.store.to_string(),
                        m.operation.to_string(),
                        error
                    ));
                }
            }
        }
        out
    }
}

/// Time one operation, recording failure instead of propagating it.
async fn measure<F, Fut, E>(store: StoreKind, operation: Operation, f: F) -> Measurement
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<u64, E>>,
    E: fmt::Display,
{
    let start = Instant::now();
    let outcome = f().await;
    let duration = start.elapsed();

    match outcome {
        Ok(rows) => {
            info!("{} {} completed in {:?}", store, operation, duration);
            Measurement {
                store,
                operation,
                duration,
                rows: Some(rows),
                error: None,
            }
        }
        Err(e) => {
            warn!("{} {} failed after {:?}: {}", store, operation, duration, e);
            Measurement {
                store,
                operation,
                duration,
                rows: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Generate the dataset once, then run the timed insert, find, update and
/// delete sequence against both stores.
///
/// Mutates both backing stores as a byproduct of measurement; reset them
/// between runs for comparable numbers.
pub async fn run_benchmark(
    postgres: &PostgresStore,
    mongo: &MongoStore,
    opts: &BenchOptions,
) -> BenchReport {
    let records = RecordGenerator::new(opts.seed).generate(opts.record_count);
    info!("Generated {} records for benchmarking", records.len());

    let mut measurements = Vec::with_capacity(8);

    measurements.push(
        measure(StoreKind::Postgres, Operation::Insert, || {
            postgres.insert(&records)
        })
        .await,
    );
    measurements.push(
        measure(StoreKind::Mongo, Operation::Insert, || {
            mongo.insert(&records)
        })
        .await,
    );

    measurements.push(
        measure(StoreKind::Postgres, Operation::Find, || async {
            postgres.find_by_id(opts.lookup_id).await.map(|_| 1)
        })
        .await,
    );
    measurements.push(
        measure(StoreKind::Mongo, Operation::Find, || async {
            mongo.find_by_id(opts.lookup_id).await.map(|_| 1)
        })
        .await,
    );

    measurements.push(
        measure(StoreKind::Postgres, Operation::Update, || {
            postgres.update_city(opts.update_min_age, &opts.update_city)
        })
        .await,
    );
    measurements.push(
        measure(StoreKind::Mongo, Operation::Update, || {
            mongo.update_city(opts.update_min_age, &opts.update_city)
        })
        .await,
    );

    measurements.push(
        measure(StoreKind::Postgres, Operation::Delete, || {
            postgres.delete_below_age(opts.delete_max_age)
        })
        .await,
    );
    measurements.push(
        measure(StoreKind::Mongo, Operation::Delete, || {
            mongo.delete_below_age(opts.delete_max_age)
        })
        .await,
    );

    BenchReport {
        record_count: opts.record_count,
        measurements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_measure_records_success() {
        let m = measure(StoreKind::Postgres, Operation::Insert, || async {
            Ok::<u64, std::io::Error>(100)
        })
        .await;

        assert!(m.succeeded());
        assert_eq!(m.rows, Some(100));
        assert!(m.error.is_none());
    }

    #[tokio::test]
    async fn test_measure_records_failure_without_propagating() {
        let m = measure(StoreKind::Mongo, Operation::Find, || async {
            Err::<u64, std::io::Error>(std::io::Error::other("backend unreachable"))
        })
        .await;

        assert!(!m.succeeded());
        assert_eq!(m.rows, None);
        assert_eq!(m.error.as_deref(), Some("backend unreachable"));
    }

    #[test]
    fn test_rows_per_second() {
        let m = Measurement {
            store: StoreKind::Postgres,
            operation: Operation::Insert,
            duration: Duration::from_secs(10),
            rows: Some(1000),
            error: None,
        };
        assert_eq!(m.rows_per_second(), Some(100.0));
    }

    #[test]
    fn test_report_render_includes_failures() {
        let report = BenchReport {
            record_count: 5,
            measurements: vec![
                Measurement {
                    store: StoreKind::Postgres,
                    operation: Operation::Insert,
                    duration: Duration::from_millis(12),
                    rows: Some(5),
                    error: None,
                },
                Measurement {
                    store: StoreKind::Mongo,
                    operation: Operation::Insert,
                    duration: Duration::from_millis(3),
                    rows: None,
                    error: Some("server selection timed out".to_string()),
                },
            ],
        };

        let rendered = report.render();
        assert!(rendered.contains("postgresql insert"));
        assert!(rendered.contains("FAILED: server selection timed out"));
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_default_options_match_harness_constants() {
        let opts = BenchOptions::default();
        assert_eq!(opts.record_count, 10_000);
        assert_eq!(opts.lookup_id, 10);
        assert_eq!(opts.update_min_age, 30);
        assert_eq!(opts.update_city, "BenchCity");
        assert_eq!(opts.delete_max_age, 20);
    }
}
