//! Simulation configuration.

use super::availability::Availability;
use crate::error::{PlanError, Result};

/// Configuration of one simulation experiment.
///
/// # Examples
///
/// ```
/// use u_offerplan::sim::{Availability, SimConfig};
///
/// let config = SimConfig::default()
///     .with_steps(3000)
///     .with_offers_per_step(5)
///     .with_availability(Availability::day_night())
///     .with_weights(vec![-0.0001, -3.0, 1.6, 4.0, 150.0, 0.00001]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of decision steps per run.
    pub steps: usize,

    /// Number of candidate actions offered at each step.
    pub offers_per_step: usize,

    /// When the actor may act.
    pub availability: Availability,

    /// Utility weight per cost/gain dimension. Costs usually carry negative
    /// weights.
    pub weights: Vec<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            steps: 5000,
            offers_per_step: 5,
            availability: Availability::AlwaysOn,
            weights: Vec::new(),
        }
    }
}

impl SimConfig {
    pub fn with_steps(mut self, n: usize) -> Self {
        self.steps = n;
        self
    }

    pub fn with_offers_per_step(mut self, k: usize) -> Self {
        self.offers_per_step = k;
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = weights;
        self
    }

    /// Validates the configuration.
    ///
    /// Zero steps is allowed; such a run scores 0.
    pub fn validate(&self) -> Result<()> {
        if self.offers_per_step == 0 {
            return Err(PlanError::InvalidConfig(
                "offers_per_step must be positive".into(),
            ));
        }
        if let Some(w) = self.weights.iter().find(|w| !w.is_finite()) {
            return Err(PlanError::InvalidConfig(format!(
                "utility weights must be finite, got {w}"
            )));
        }
        self.availability.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.steps, 5000);
        assert_eq!(config.offers_per_step, 5);
        assert_eq!(config.availability, Availability::AlwaysOn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_offers() {
        let config = SimConfig::default().with_offers_per_step(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nan_weight() {
        let config = SimConfig::default().with_weights(vec![1.0, f64::NAN]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_availability() {
        let config = SimConfig::default().with_availability(Availability::DayNight {
            open_hour: 23,
            close_hour: 8,
        });
        assert!(config.validate().is_err());
    }
}
