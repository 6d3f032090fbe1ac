//! Seeded generator producing batches of benchmark records.

use crate::record::{Address, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed set of cities a generated record's address is drawn from.
pub const CITIES: [&str; 5] = ["City0", "City1", "City2", "City3", "City4"];

/// Fixed ordered tag list attached to every record.
pub const TAGS: [&str; 3] = ["bench", "json", "crud"];

/// Half-open age range for generated records.
pub const AGE_MIN: i64 = 20;
pub const AGE_MAX: i64 = 70;

/// Zip codes are derived from the record identifier.
const ZIP_BASE: i64 = 380_000;

/// Record generator backed by a seeded RNG.
///
/// The same seed produces the same batch, so benchmark runs against the
/// two stores see identical data.
pub struct RecordGenerator {
    rng: StdRng,
}

impl RecordGenerator {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` records with identifiers 1..=count.
    ///
    /// The full batch is produced eagerly; memory cost is O(count).
    pub fn generate(&mut self, count: u64) -> Vec<Record> {
        (1..=count as i64).map(|id| self.record(id)).collect()
    }

    fn record(&mut self, id: i64) -> Record {
        let age = self.rng.gen_range(AGE_MIN..AGE_MAX);
        let city = CITIES[self.rng.gen_range(0..CITIES.len())];
        Record {
            id,
            name: format!("User {id}"),
            age,
            address: Address {
                city: city.to_string(),
                zip: (ZIP_BASE + id).to_string(),
            },
            tags: TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}
