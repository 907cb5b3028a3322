//! Sources of generated filenames

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Supplies a fresh filename for rows that have none
///
/// Called once per row; every call must return a new name.
pub trait FilenameSource: Send + Sync {
    /// Next filename
    fn next_name(&self) -> String;
}

/// Random v4 UUIDs, not reproducible across runs
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidNames;

impl FilenameSource for UuidNames {
    fn next_name(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// UUID-shaped names drawn from a seeded generator
///
/// The same seed yields the same sequence, which makes re-runs reproducible.
#[derive(Debug)]
pub struct SeededNames {
    rng: Mutex<StdRng>,
}

impl SeededNames {
    /// Create a generator from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl FilenameSource for SeededNames {
    fn next_name(&self) -> String {
        let bytes: [u8; 16] = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .r#gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }
}
