//! Policy search for weighted-offer allocation processes.
//!
//! An actor is repeatedly offered a few candidate actions drawn from a
//! weighted catalog and either takes one or refreshes the offer (at most
//! once per simulated day). This crate finds a decision policy that
//! maximizes a linear utility of the accumulated costs and gains per
//! elapsed hour.
//!
//! - **Catalog**: immutable action table and inverse-CDF offer sampler.
//! - **Simulation**: time-stepped replay of a policy over a precomputed
//!   offer sequence, with pluggable availability rules.
//! - **Policies**: a priority permutation, and a time-of-day composite of
//!   two permutations, each with a copy-on-mutate neighbor operator.
//! - **Annealing**: generic simulated annealing over any
//!   neighbor/score contract.
//! - **Planning**: a seeded driver tying the above together.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_offerplan::anneal::AnnealConfig;
//! use u_offerplan::catalog::Catalog;
//! use u_offerplan::plan::{PlanConfig, Planner};
//! use u_offerplan::policy::RankPolicy;
//! use u_offerplan::sim::{Availability, SimConfig};
//!
//! let table = "code,duration,rate,cost-Coins,gain-BP\n\
//!              C1,1,0.6,1000,1\n\
//!              D4,4,0.4,3000,6\n";
//! let catalog = Arc::new(Catalog::from_table(table).unwrap());
//!
//! let config = PlanConfig::default()
//!     .with_simulation(
//!         SimConfig::default()
//!             .with_steps(1000)
//!             .with_availability(Availability::day_night())
//!             .with_weights(vec![-0.001, 1.0]),
//!     )
//!     .with_anneal(AnnealConfig::default().with_rounds(5).with_sub_iterations(10))
//!     .with_seed(1);
//!
//! let outcome = Planner::new(catalog.clone(), config)
//!     .unwrap()
//!     .plan(RankPolicy::identity(catalog.len()))
//!     .unwrap();
//! println!("{:.3}: {}", outcome.best_score, outcome.best.encode(&catalog));
//! ```

pub mod anneal;
pub mod catalog;
pub mod error;
pub mod plan;
pub mod policy;
pub mod random;
pub mod sim;

pub use error::{PlanError, Result};
