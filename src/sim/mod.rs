//! Time-stepped simulation of the offer process.
//!
//! A [`SimContext`] fixes one experiment: catalog, step count, offer size,
//! availability rule, utility weights and the precomputed offer sequence.
//! Scoring a policy replays every step on a fresh [`SimStatus`]:
//!
//! 1. Take the next offer set
//! 2. Ask the policy for an action (refresh allowed once per day)
//! 3. Advance the clock to `max(next_available(clock), completion)`
//! 4. Accumulate the action's cost/gain vector
//!
//! The score is the weighted cost/gain total per elapsed hour.

mod availability;
mod config;
mod context;
mod stats;
mod status;

pub use availability::Availability;
pub use config::SimConfig;
pub use context::SimContext;
pub use stats::SimStats;
pub use status::SimStatus;
