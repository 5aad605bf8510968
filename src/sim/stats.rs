//! Read-only run snapshot.

use super::availability::{DAY, HOUR};
use crate::catalog::{ActionType, Catalog};
use std::fmt;
use std::time::Duration;

/// Outcome of one simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimStats {
    /// Simulated time elapsed from the start of the run.
    pub elapsed: Duration,

    /// Decision steps executed.
    pub steps: usize,

    /// How often each action was chosen, indexed by catalog index.
    pub counts: Vec<usize>,

    /// Accumulated cost/gain per dimension.
    pub cost_gain: Vec<f64>,
}

impl SimStats {
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed.as_secs_f64() / HOUR.as_secs_f64()
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed.as_secs_f64() / DAY.as_secs_f64()
    }

    pub fn count(&self, action: ActionType) -> usize {
        self.counts[action.index()]
    }

    /// Time-normalized linear utility: `Σ w[i] * cost_gain[i] / hours`.
    ///
    /// Returns 0 when no simulated time elapsed.
    pub fn score(&self, weights: &[f64]) -> f64 {
        let hours = self.elapsed_hours();
        if hours <= 0.0 {
            return 0.0;
        }
        weights
            .iter()
            .zip(&self.cost_gain)
            .map(|(w, cg)| w * cg)
            .sum::<f64>()
            / hours
    }

    /// Accumulated cost/gain per simulated day, per dimension.
    pub fn daily_rates(&self) -> Vec<f64> {
        let days = self.elapsed_days();
        if days <= 0.0 {
            return vec![0.0; self.cost_gain.len()];
        }
        self.cost_gain.iter().map(|v| v / days).collect()
    }

    /// Formats the snapshot with catalog codes and dimension names.
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> impl fmt::Display + 'a {
        StatsDisplay {
            stats: self,
            catalog,
        }
    }
}

struct StatsDisplay<'a> {
    stats: &'a SimStats,
    catalog: &'a Catalog,
}

impl fmt::Display for StatsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<String> = self
            .catalog
            .actions()
            .map(|a| format!("{}={}", self.catalog.code(a), self.stats.count(a)))
            .collect();
        let totals: Vec<String> = self
            .catalog
            .dimensions()
            .iter()
            .zip(&self.stats.cost_gain)
            .map(|(name, v)| format!("{name}={v:.3}"))
            .collect();
        write!(
            f,
            "steps={} elapsed={:.1}h ({:.2} days) counts={{{}}} cost_gain={{{}}}",
            self.stats.steps,
            self.stats.elapsed_hours(),
            self.stats.elapsed_days(),
            counts.join(","),
            totals.join(","),
        )
    }
}
