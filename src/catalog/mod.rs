//! Action catalog and weighted offer sampling.
//!
//! The catalog is the immutable, ordered list of action types the actor
//! can be offered. Slot 0 is the implicit refresh action; every other slot
//! is a project with a duration, an occurrence weight and a cost/gain
//! vector. Offers are drawn i.i.d. from the occurrence weights by
//! inverse-CDF sampling.
//!
//! # Key Types
//!
//! - [`ActionType`]: refresh or a project index
//! - [`Catalog`]: the action table, shared via `Arc`
//! - [`WeightedSampler`]: cumulative-weight table with binary-search draws

mod action;
#[allow(clippy::module_inception)]
mod catalog;
mod sampler;

pub use action::ActionType;
pub use catalog::{Catalog, CatalogEntry, BASE_COLUMNS, REFRESH_CODE};
pub use sampler::WeightedSampler;
