//! Random number generator construction.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded generator.
///
/// `None` draws a fresh seed from the thread-local generator, so unseeded
/// runs are not reproducible.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(rand::random()),
    }
}
