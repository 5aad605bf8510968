//! Simulated annealing over any neighbor/score contract.
//!
//! The runner knows nothing about policies: it only asks an
//! [`AnnealProblem`] for one random neighbor and for a score. Worse
//! neighbors are accepted with a probability that shrinks as the
//! temperature cools geometrically round by round, which lets the search
//! leave local optima early and settle later.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;
mod types;

pub use config::{AnnealConfig, CoolingSchedule};
pub use runner::{AnnealResult, AnnealRunner};
pub use types::AnnealProblem;
