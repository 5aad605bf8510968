//! Core trait for decision policies.

use crate::catalog::ActionType;
use crate::sim::{SimContext, SimStatus};
use rand::Rng;

/// A decision rule for the offer process.
///
/// Implementations must be copy-on-mutate: [`mutate`](Policy::mutate)
/// returns a new instance and never changes `self`. Composite policies rely
/// on this to share unmutated parts between parent and child.
pub trait Policy {
    /// Chooses an action for the current step.
    ///
    /// `offers` is the candidate set drawn for this step. Returning
    /// [`ActionType::Refresh`] discards the offers.
    fn decide(&self, status: &SimStatus, offers: &[ActionType]) -> ActionType;

    /// Number of actions the policy ranks, refresh included. Must equal
    /// the catalog size of any context it is scored against.
    fn action_count(&self) -> usize;

    /// Produces one random neighbor of this policy.
    fn mutate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self
    where
        Self: Sized;

    /// Scores this policy against `ctx`.
    fn score(&self, ctx: &SimContext) -> f64
    where
        Self: Sized,
    {
        ctx.score(self)
    }
}
