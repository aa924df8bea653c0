//! # Todo ID Generation
//!
//! Short pseudo-random alphanumeric ids. Characters must be valid in a URL
//! path segment since ids are addressed as `/todo/{id}`.
//!
//! The generator makes no uniqueness promise on its own; the store checks
//! fresh ids against its records before using them.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of characters in a generated id
pub const ID_LENGTH: usize = 10;

/// Alphabet ids are drawn from
pub const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Pseudo-random id source.
///
/// Not thread-safe by itself (`generate` takes `&mut self`); the store keeps
/// it behind the same lock as the records.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Create a generator seeded from the wall clock
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::from_seed(nanos)
    }

    /// Create a generator with a fixed seed (deterministic output)
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce the next id
    pub fn generate(&mut self) -> String {
        (0..ID_LENGTH)
            .map(|_| ID_CHARSET[self.rng.gen_range(0..ID_CHARSET.len())] as char)
            .collect()
    }

    /// Check that `id` has the shape of a generated id
    pub fn is_valid(id: &str) -> bool {
        id.len() == ID_LENGTH && id.bytes().all(|b| ID_CHARSET.contains(&b))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
