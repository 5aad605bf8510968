//! Annealing execution loop.

use super::config::AnnealConfig;
use super::types::AnnealProblem;
use crate::error::Result;
use crate::random::{create_rng, resolve_seed};
use rand::Rng;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Score of the best solution.
    pub best_score: f64,

    /// Score of the starting solution.
    pub initial_score: f64,

    /// Outer rounds executed.
    pub rounds: usize,

    /// Total neighbor evaluations.
    pub iterations: usize,

    /// Temperature after the last round's cooling step.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Best score at the start and after every round. Non-decreasing.
    pub score_history: Vec<f64>,
}

impl<S: Clone> AnnealResult<S> {
    /// Whether the search found something better than its start.
    pub fn improved(&self) -> bool {
        self.best_score > self.initial_score
    }
}

/// Executes the annealing search.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the search from `initial` with a generator seeded from
    /// `config.seed`, or from the wall clock when no seed is set.
    pub fn run<P: AnnealProblem>(
        problem: &P,
        initial: P::Solution,
        config: &AnnealConfig,
    ) -> Result<AnnealResult<P::Solution>> {
        let seed = resolve_seed(config.seed);
        tracing::info!(seed, "annealing seed");
        let mut rng = create_rng(seed);
        Self::run_with_rng(problem, initial, config, &mut rng)
    }

    /// Runs the search drawing every random choice from `rng`.
    ///
    /// Each inner step generates one neighbor of the current solution.
    /// Improvements are always accepted; other moves are accepted with
    /// probability `exp(delta / T)` (Metropolis), and never at `T == 0`.
    pub fn run_with_rng<P: AnnealProblem, R: Rng + ?Sized>(
        problem: &P,
        initial: P::Solution,
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealResult<P::Solution>> {
        config.validate()?;

        let mut current_score = problem.score(&initial);
        let mut current = initial;
        let mut best = current.clone();
        let mut best_score = current_score;
        let initial_score = current_score;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let mut score_history = Vec::with_capacity(config.rounds + 1);
        score_history.push(best_score);

        tracing::info!(
            score = current_score,
            rounds = config.rounds,
            sub_iterations = config.sub_iterations,
            temperature,
            "annealing started"
        );

        for round in 0..config.rounds {
            for _ in 0..config.sub_iterations {
                let neighbor = problem.neighbor(&current, rng);
                let neighbor_score = problem.score(&neighbor);
                let delta = neighbor_score - current_score;

                // Metropolis acceptance criterion
                let accept = if delta > 0.0 {
                    improving_moves += 1;
                    true
                } else if temperature > 0.0 {
                    rng.random::<f64>() < (delta / temperature).exp()
                } else {
                    false
                };

                if accept {
                    current = neighbor;
                    current_score = neighbor_score;
                    accepted_moves += 1;

                    if current_score > best_score {
                        tracing::debug!(from = best_score, to = current_score, "new best");
                        best = current.clone();
                        best_score = current_score;
                    }
                }

                iterations += 1;
            }

            score_history.push(best_score);
            tracing::info!(
                round,
                temperature,
                chance = (-1.0 / temperature).exp(),
                score = current_score,
                best = best_score,
                "annealing round finished"
            );

            temperature = config.cooling.cool(temperature);
        }

        tracing::info!(best = best_score, initial = initial_score, iterations, "annealing finished");

        Ok(AnnealResult {
            best,
            best_score,
            initial_score,
            rounds: config.rounds,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            score_history,
        })
    }
}
