//! Adapter from policies to the annealing contract.

use crate::anneal::AnnealProblem;
use crate::policy::Policy;
use crate::sim::SimContext;
use rand::Rng;
use std::marker::PhantomData;

/// Scores policies of type `P` against one simulation context.
///
/// Neighbors come from [`Policy::mutate`]; scores from
/// [`SimContext::score`].
#[derive(Debug)]
pub struct PolicySearch<'a, P> {
    ctx: &'a SimContext,
    _policy: PhantomData<fn() -> P>,
}

impl<'a, P> PolicySearch<'a, P> {
    pub fn new(ctx: &'a SimContext) -> Self {
        Self {
            ctx,
            _policy: PhantomData,
        }
    }

    pub fn context(&self) -> &'a SimContext {
        self.ctx
    }
}

impl<P: Policy + Clone> AnnealProblem for PolicySearch<'_, P> {
    type Solution = P;

    fn score(&self, policy: &P) -> f64 {
        self.ctx.score(policy)
    }

    fn neighbor<R: Rng + ?Sized>(&self, policy: &P, rng: &mut R) -> P {
        policy.mutate(rng)
    }
}
