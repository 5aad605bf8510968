//! Inverse-CDF sampling over catalog occurrence weights.

use crate::error::{PlanError, Result};
use rand::Rng;

/// Draws catalog indices with probability proportional to their weight.
///
/// Holds a monotonically non-decreasing cumulative table normalized so that
/// the last entry is exactly `1.0`. A draw generates `u ~ U[0, 1)` and
/// returns the smallest index whose cumulative value exceeds `u`, so
/// zero-weight entries are never returned.
///
/// # Examples
///
/// ```
/// use u_offerplan::catalog::WeightedSampler;
/// use rand::SeedableRng;
///
/// let sampler = WeightedSampler::new(&[0.0, 1.0, 0.0]).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// assert_eq!(sampler.sample(&mut rng), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    cumulative: Vec<f64>,
}

impl WeightedSampler {
    /// Builds the cumulative table.
    ///
    /// Fails when `weights` is empty, contains a negative or non-finite
    /// value, or sums to zero.
    pub fn new(weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(PlanError::InvalidWeights("no weights given".into()));
        }
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(PlanError::InvalidWeights(format!(
                "weight {i} must be finite and non-negative, got {w}"
            )));
        }

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut sum = 0.0;
        for &w in weights {
            sum += w;
            cumulative.push(sum);
        }
        if sum <= 0.0 {
            return Err(PlanError::InvalidWeights(
                "weights must sum to a positive total".into(),
            ));
        }
        for c in &mut cumulative {
            *c /= sum;
        }

        Ok(Self { cumulative })
    }

    /// Number of entries the sampler draws from.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Normalized probability of drawing `index`, or `None` when out of range.
    pub fn probability(&self, index: usize) -> Option<f64> {
        let upper = *self.cumulative.get(index)?;
        let lower = match index {
            0 => 0.0,
            i => self.cumulative[i - 1],
        };
        Some(upper - lower)
    }

    /// Draws one index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u: f64 = rng.random();
        let idx = self.cumulative.partition_point(|&c| c <= u);
        // u < 1.0 == last entry, so idx is in range; clamp for rounding.
        idx.min(self.cumulative.len() - 1)
    }

    /// Draws `k` indices independently, with replacement.
    pub fn sample_n<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Vec<usize> {
        (0..k).map(|_| self.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_single_nonzero_weight_always_drawn() {
        let sampler = WeightedSampler::new(&[1.0, 0.0, 0.0]).unwrap();
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert_eq!(sampler.sample(&mut rng), 0);
        }
    }

    #[test]
    fn test_uniform_frequencies_converge() {
        let n = 5;
        let sampler = WeightedSampler::new(&vec![2.0; n]).unwrap();
        let mut rng = create_rng(42);
        let draws = 200_000;
        let mut counts = vec![0usize; n];
        for idx in sampler.sample_n(draws, &mut rng) {
            counts[idx] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            let freq = c as f64 / draws as f64;
            assert!(
                (freq - 0.2).abs() < 0.01,
                "entry {i}: frequency {freq} too far from 0.2"
            );
        }
    }

    #[test]
    fn test_proportional_frequencies_converge() {
        let sampler = WeightedSampler::new(&[1.0, 3.0]).unwrap();
        let mut rng = create_rng(7);
        let draws = 100_000;
        let hits = sampler
            .sample_n(draws, &mut rng)
            .into_iter()
            .filter(|&i| i == 1)
            .count();
        let freq = hits as f64 / draws as f64;
        assert!((freq - 0.75).abs() < 0.01, "got {freq}");
    }

    #[test]
    fn test_last_cumulative_is_one() {
        let sampler = WeightedSampler::new(&[0.3, 0.3, 0.4]).unwrap();
        assert_eq!(sampler.cumulative[2], 1.0);
        assert!((sampler.probability(1).unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_probability_out_of_range() {
        let sampler = WeightedSampler::new(&[1.0, 3.0]).unwrap();
        assert_eq!(sampler.probability(0), Some(0.25));
        assert_eq!(sampler.probability(1), Some(0.75));
        assert_eq!(sampler.probability(2), None);
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(WeightedSampler::new(&[]).is_err());
        assert!(WeightedSampler::new(&[0.0, 0.0]).is_err());
        assert!(WeightedSampler::new(&[1.0, -0.5]).is_err());
        assert!(WeightedSampler::new(&[1.0, f64::NAN]).is_err());
    }

    proptest! {
        #[test]
        fn prop_zero_weight_never_drawn(
            weights in prop::collection::vec(prop_oneof![Just(0.0), 0.1f64..10.0], 1..12),
            seed in any::<u64>(),
        ) {
            prop_assume!(weights.iter().sum::<f64>() > 0.0);
            let sampler = WeightedSampler::new(&weights).unwrap();
            let mut rng = create_rng(seed);
            for idx in sampler.sample_n(200, &mut rng) {
                prop_assert!(weights[idx] > 0.0);
            }
        }
    }
}
