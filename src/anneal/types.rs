//! Core trait for the annealing search.

use rand::Rng;

/// Defines an annealing problem over some solution representation.
///
/// The implementor supplies neighbor generation and scoring; the runner
/// handles temperature, acceptance and best tracking. The runner caches
/// every score it computes, so `score` is called once per solution.
///
/// # Maximization
///
/// The search maximizes the score. For minimization, negate the cost.
///
/// # Examples
///
/// ```ignore
/// struct Search<'a> { ctx: &'a SimContext }
///
/// impl AnnealProblem for Search<'_> {
///     type Solution = RankPolicy;
///
///     fn score(&self, policy: &RankPolicy) -> f64 {
///         self.ctx.score(policy)
///     }
///
///     fn neighbor<R: Rng + ?Sized>(&self, policy: &RankPolicy, rng: &mut R) -> RankPolicy {
///         policy.mutate(rng)
///     }
/// }
/// ```
pub trait AnnealProblem {
    /// The solution representation type.
    type Solution: Clone;

    /// Computes the score of a solution. Higher is better.
    fn score(&self, solution: &Self::Solution) -> f64;

    /// Generates one random neighbor of `solution` without modifying it.
    fn neighbor<R: Rng + ?Sized>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
