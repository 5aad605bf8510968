//! Per-experiment simulation context.

use super::config::SimConfig;
use super::stats::SimStats;
use super::status::SimStatus;
use crate::catalog::{ActionType, Catalog};
use crate::error::{PlanError, Result};
use crate::policy::Policy;
use rand::Rng;
use std::sync::Arc;

/// Immutable experiment setup shared by every policy scored in one search.
///
/// Holds a precomputed sequence of offer sets, one per step, drawn once at
/// construction. Every policy evaluated against the same context faces the
/// same offers, so score differences reflect the policies rather than
/// sampling noise.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_offerplan::catalog::Catalog;
/// use u_offerplan::policy::RankPolicy;
/// use u_offerplan::random::create_rng;
/// use u_offerplan::sim::{SimConfig, SimContext};
///
/// let catalog = Arc::new(Catalog::from_table("code,duration,rate,gain\nA,1,1,1\n").unwrap());
/// let config = SimConfig::default().with_steps(100).with_weights(vec![1.0]);
/// let ctx = SimContext::new(catalog, config, &mut create_rng(42)).unwrap();
///
/// // Prefer A over refresh: one gain per hour.
/// let policy = RankPolicy::from_ranks(vec![1, 0]).unwrap();
/// assert!((ctx.score(&policy) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SimContext {
    catalog: Arc<Catalog>,
    config: SimConfig,
    offers: Vec<Vec<ActionType>>,
}

impl SimContext {
    /// Validates `config` against `catalog` and draws the offer sequence.
    pub fn new<R: Rng + ?Sized>(catalog: Arc<Catalog>, config: SimConfig, rng: &mut R) -> Result<Self> {
        check_config(&catalog, &config)?;
        let offers = (0..config.steps)
            .map(|_| catalog.sample_offers(config.offers_per_step, rng))
            .collect();
        Ok(Self {
            catalog,
            config,
            offers,
        })
    }

    /// Builds a context from an explicit offer sequence.
    ///
    /// `offers` must hold exactly `config.steps` non-empty sets of actions
    /// known to `catalog`; `offers_per_step` is not enforced.
    pub fn with_offers(catalog: Arc<Catalog>, config: SimConfig, offers: Vec<Vec<ActionType>>) -> Result<Self> {
        check_config(&catalog, &config)?;
        if offers.len() != config.steps {
            return Err(PlanError::DimensionMismatch {
                what: "offer sequence",
                expected: config.steps,
                found: offers.len(),
            });
        }
        for set in &offers {
            if set.is_empty() {
                return Err(PlanError::InvalidConfig("offer sets must not be empty".into()));
            }
            if let Some(a) = set.iter().find(|a| a.index() >= catalog.len()) {
                return Err(PlanError::InvalidConfig(format!(
                    "offered action {a} is outside the catalog"
                )));
            }
        }
        Ok(Self {
            catalog,
            config,
            offers,
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn steps(&self) -> usize {
        self.config.steps
    }

    /// The whole precomputed offer sequence.
    pub fn offers(&self) -> &[Vec<ActionType>] {
        &self.offers
    }

    pub fn offers_at(&self, step: usize) -> &[ActionType] {
        &self.offers[step]
    }

    /// A fresh status sized for this context's catalog.
    pub fn new_status(&self) -> SimStatus {
        SimStatus::new(self.catalog.len(), self.catalog.dimension_count())
    }

    /// Checks that `policy` ranks exactly this catalog's actions.
    pub fn check_policy<P: Policy + ?Sized>(&self, policy: &P) -> Result<()> {
        if policy.action_count() != self.catalog.len() {
            return Err(PlanError::DimensionMismatch {
                what: "policy ranks",
                expected: self.catalog.len(),
                found: policy.action_count(),
            });
        }
        Ok(())
    }

    /// Replays every step under `policy`.
    ///
    /// # Panics
    /// Panics if `policy` ranks fewer actions than the catalog holds; see
    /// [`check_policy`](Self::check_policy).
    pub fn run<P: Policy + ?Sized>(&self, policy: &P) -> SimStats {
        let mut status = self.new_status();
        for _ in 0..self.config.steps {
            status.step(self, policy);
        }
        status.into_stats()
    }

    /// Time-normalized utility of `policy` over this context.
    pub fn score<P: Policy + ?Sized>(&self, policy: &P) -> f64 {
        self.run(policy).score(&self.config.weights)
    }
}

fn check_config(catalog: &Catalog, config: &SimConfig) -> Result<()> {
    config.validate()?;
    if config.weights.len() != catalog.dimension_count() {
        return Err(PlanError::DimensionMismatch {
            what: "utility weights",
            expected: catalog.dimension_count(),
            found: config.weights.len(),
        });
    }
    Ok(())
}
