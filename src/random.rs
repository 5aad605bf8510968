//! Random source construction.
//!
//! Every search run draws from exactly one generator: the offer sequence of
//! the simulation context and all mutation choices come from the same
//! stream, so a fixed seed reproduces a whole run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Seed derived from the wall clock, in milliseconds since the Unix epoch.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Resolves an optional seed, falling back to [`clock_seed`].
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(clock_seed)
}
