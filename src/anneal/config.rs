//! Annealing configuration and cooling schedules.

use crate::error::{PlanError, Result};

/// Temperature update applied after every outer round.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - LundyMees: Lundy & Mees (1986)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CoolingSchedule {
    /// Geometric cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.94 }
    }
}

impl CoolingSchedule {
    /// Next temperature after one round at `temperature`.
    pub fn cool(&self, temperature: f64) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }
}

/// Configuration for the annealing search.
///
/// The search runs `rounds` outer rounds of `sub_iterations` neighbor
/// evaluations each, cooling once per round. Scores are maximized.
///
/// # Examples
///
/// ```
/// use u_offerplan::anneal::{AnnealConfig, CoolingSchedule};
///
/// let config = AnnealConfig::default()
///     .with_rounds(100)
///     .with_sub_iterations(200)
///     .with_initial_temperature(1.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.94 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealConfig {
    /// Number of outer rounds (temperature levels).
    pub rounds: usize,

    /// Neighbor evaluations per round.
    pub sub_iterations: usize,

    /// Starting temperature. Zero makes the search pure greedy ascent.
    pub initial_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Random seed for reproducibility. `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            sub_iterations: 200,
            initial_temperature: 1.0,
            cooling: CoolingSchedule::default(),
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_rounds(mut self, n: usize) -> Self {
        self.rounds = n;
        self
    }

    pub fn with_sub_iterations(mut self, n: usize) -> Self {
        self.sub_iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(PlanError::InvalidConfig(
                "initial_temperature must be finite and non-negative".into(),
            ));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(PlanError::InvalidConfig(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0 && beta.is_finite()) {
                    return Err(PlanError::InvalidConfig(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
        }
        Ok(())
    }
}
