//! Planner configuration.

use crate::anneal::AnnealConfig;
use crate::error::Result;
use crate::sim::SimConfig;

/// Simulation and search settings for one planning run.
///
/// `anneal.seed` seeds the single random source that draws both the offer
/// sequence and every mutation choice.
///
/// # Examples
///
/// ```
/// use u_offerplan::anneal::AnnealConfig;
/// use u_offerplan::plan::PlanConfig;
/// use u_offerplan::sim::SimConfig;
///
/// let config = PlanConfig::default()
///     .with_simulation(SimConfig::default().with_steps(1000).with_weights(vec![1.0]))
///     .with_anneal(AnnealConfig::default().with_rounds(10))
///     .with_seed(7);
/// assert_eq!(config.anneal.seed, Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanConfig {
    pub simulation: SimConfig,
    pub anneal: AnnealConfig,
}

impl PlanConfig {
    pub fn with_simulation(mut self, simulation: SimConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.anneal.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.anneal.validate()
    }

    /// Parses a JSON configuration; missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Availability;

    #[test]
    fn test_default_validates() {
        assert!(PlanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_propagates() {
        let config = PlanConfig::default().with_anneal(AnnealConfig::default().with_initial_temperature(-1.0));
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_partial() {
        let json = r#"{
            "simulation": {
                "steps": 3000,
                "availability": { "day_night": { "open_hour": 8, "close_hour": 23 } },
                "weights": [-0.0001, 1.6]
            },
            "anneal": { "rounds": 50, "seed": 3 }
        }"#;
        let config = PlanConfig::from_json(json).unwrap();
        assert_eq!(config.simulation.steps, 3000);
        assert_eq!(config.simulation.offers_per_step, 5);
        assert_eq!(config.simulation.availability, Availability::day_night());
        assert_eq!(config.simulation.weights, vec![-0.0001, 1.6]);
        assert_eq!(config.anneal.rounds, 50);
        assert_eq!(config.anneal.sub_iterations, 200);
        assert_eq!(config.anneal.seed, Some(3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_always_on() {
        let config = PlanConfig::from_json(r#"{"simulation": {"availability": "always_on"}}"#).unwrap();
        assert_eq!(config.simulation.availability, Availability::AlwaysOn);
    }
}
