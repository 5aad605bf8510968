//! End-to-end planning: one seeded source, one context, one search.

use super::config::PlanConfig;
use super::search::PolicySearch;
use crate::anneal::AnnealRunner;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::policy::{Policy, RankPolicy, TimeSwitchPolicy};
use crate::random::{create_rng, resolve_seed};
use crate::sim::{SimContext, SimStats};
use rand::rngs::StdRng;
use std::sync::Arc;

/// Result of one planning run.
#[derive(Debug, Clone)]
pub struct PlanOutcome<P> {
    /// Best policy found.
    pub best: P,

    /// Score of `best` against the session context.
    pub best_score: f64,

    /// Score of the starting policy against the same context.
    pub initial_score: f64,

    /// Snapshot of `best` replayed over the session context.
    pub stats: SimStats,

    /// Seed of the session's random source.
    pub seed: u64,

    /// Neighbor evaluations performed.
    pub iterations: usize,

    /// Best score at the start and after every annealing round.
    pub score_history: Vec<f64>,
}

impl<P> PlanOutcome<P> {
    pub fn improved(&self) -> bool {
        self.best_score > self.initial_score
    }
}

/// Builds planning sessions for one catalog and configuration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_offerplan::anneal::AnnealConfig;
/// use u_offerplan::catalog::Catalog;
/// use u_offerplan::plan::{PlanConfig, Planner};
/// use u_offerplan::policy::RankPolicy;
/// use u_offerplan::sim::SimConfig;
///
/// let catalog = Arc::new(
///     Catalog::from_table("code,duration,rate,gain\nA,1,1,1\nB,1,1,5\n").unwrap(),
/// );
/// let config = PlanConfig::default()
///     .with_simulation(SimConfig::default().with_steps(500).with_weights(vec![1.0]))
///     .with_anneal(AnnealConfig::default().with_rounds(10).with_sub_iterations(10))
///     .with_seed(42);
///
/// let planner = Planner::new(catalog, config).unwrap();
/// let outcome = planner.plan(RankPolicy::identity(3)).unwrap();
/// assert!(outcome.best_score >= outcome.initial_score);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Arc<Catalog>,
    config: PlanConfig,
}

impl Planner {
    pub fn new(catalog: Arc<Catalog>, config: PlanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Seeds the random source and draws the session's offer sequence.
    pub fn session(&self) -> Result<PlanSession> {
        let seed = resolve_seed(self.config.anneal.seed);
        let mut rng = create_rng(seed);
        let context = SimContext::new(
            Arc::clone(&self.catalog),
            self.config.simulation.clone(),
            &mut rng,
        )?;
        tracing::info!(
            seed,
            steps = context.steps(),
            actions = self.catalog.len(),
            "planning session ready"
        );
        Ok(PlanSession {
            context,
            planner: self.clone(),
            rng,
            seed,
        })
    }

    /// Runs a single search from `initial` in a fresh session.
    pub fn plan<P: Policy + Clone>(&self, initial: P) -> Result<PlanOutcome<P>> {
        self.session()?.run(initial)
    }
}

/// A simulation context plus the random source that produced it.
///
/// Successive [`run`](Self::run) calls score against the same offer
/// sequence and keep drawing from the same generator.
#[derive(Debug)]
pub struct PlanSession {
    context: SimContext,
    planner: Planner,
    rng: StdRng,
    seed: u64,
}

impl PlanSession {
    pub fn context(&self) -> &SimContext {
        &self.context
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The session's generator, for seeding initial policies.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// A uniformly shuffled ranking of the catalog's actions.
    pub fn seed_rank_policy(&mut self) -> RankPolicy {
        RankPolicy::shuffled(self.context.catalog().len(), &mut self.rng)
    }

    /// A composite policy whose day and evening rankings start equal.
    pub fn seed_time_switch_policy(&mut self) -> TimeSwitchPolicy {
        TimeSwitchPolicy::uniform(self.seed_rank_policy())
    }

    /// Scores `policy` against the session context.
    pub fn score<P: Policy>(&self, policy: &P) -> f64 {
        self.context.score(policy)
    }

    /// Anneals from `initial` and replays the best policy for its stats.
    ///
    /// Fails when `initial` does not rank exactly the catalog's actions.
    pub fn run<P: Policy + Clone>(&mut self, initial: P) -> Result<PlanOutcome<P>> {
        self.context.check_policy(&initial)?;
        let search = PolicySearch::<P>::new(&self.context);
        let result = AnnealRunner::run_with_rng(&search, initial, &self.planner.config.anneal, &mut self.rng)?;
        let stats = self.context.run(&result.best);

        tracing::info!(
            from = result.initial_score,
            to = result.best_score,
            elapsed_days = stats.elapsed_days(),
            "planning run finished"
        );

        Ok(PlanOutcome {
            best: result.best,
            best_score: result.best_score,
            initial_score: result.initial_score,
            stats,
            seed: self.seed,
            iterations: result.iterations,
            score_history: result.score_history,
        })
    }
}
