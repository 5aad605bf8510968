//! Policy search driver.
//!
//! Wires the pieces together the way a planning run uses them:
//!
//! 1. Seed one random source (fixed seed or wall clock)
//! 2. Draw the simulation context's offer sequence from it
//! 3. Anneal from an initial policy, drawing mutations from the same source
//! 4. Replay the best policy for its stats
//!
//! A [`PlanSession`] keeps the context and generator alive so that
//! repeated runs (for example, resuming from the previous best) are scored
//! against identical offers.

mod config;
mod planner;
mod search;

pub use config::PlanConfig;
pub use planner::{PlanOutcome, PlanSession, Planner};
pub use search::PolicySearch;
