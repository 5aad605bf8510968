//! Priority-rank policy.

use super::types::Policy;
use crate::catalog::{ActionType, Catalog};
use crate::error::{PlanError, Result};
use crate::sim::SimStatus;
use rand::seq::SliceRandom;
use rand::Rng;

/// Prefers the offered action with the lowest rank.
///
/// `ranks[i]` is the rank of the action at catalog index `i`; the ranks
/// form a permutation of `[0, n)`. If the best offer ranks worse than the
/// refresh action and a refresh is allowed, the policy refreshes instead.
///
/// # Examples
///
/// ```
/// use u_offerplan::catalog::ActionType;
/// use u_offerplan::policy::{Policy, RankPolicy};
/// use u_offerplan::sim::SimStatus;
///
/// // Project 2 first, then refresh, then project 1.
/// let policy = RankPolicy::from_order(&[
///     ActionType::Project(2),
///     ActionType::Refresh,
///     ActionType::Project(1),
/// ])
/// .unwrap();
/// let status = SimStatus::new(3, 0);
/// assert_eq!(policy.decide(&status, &[ActionType::Project(1)]), ActionType::Refresh);
/// assert_eq!(
///     policy.decide(&status, &[ActionType::Project(1), ActionType::Project(2)]),
///     ActionType::Project(2)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankPolicy {
    ranks: Vec<usize>,
}

impl RankPolicy {
    /// Ranks every action by its catalog index (refresh first).
    pub fn identity(n: usize) -> Self {
        Self {
            ranks: (0..n).collect(),
        }
    }

    /// A uniformly random ranking of `n` actions.
    pub fn shuffled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut ranks: Vec<usize> = (0..n).collect();
        ranks.shuffle(rng);
        Self { ranks }
    }

    /// Wraps a rank array, checking that it is a permutation of `[0, n)`.
    pub fn from_ranks(ranks: Vec<usize>) -> Result<Self> {
        if ranks.is_empty() {
            return Err(PlanError::EmptyCatalog);
        }
        let mut seen = vec![false; ranks.len()];
        for &r in &ranks {
            if r >= ranks.len() {
                return Err(PlanError::InvalidRanks(format!(
                    "rank {r} out of range for {} actions",
                    ranks.len()
                )));
            }
            if std::mem::replace(&mut seen[r], true) {
                return Err(PlanError::InvalidRanks(format!("rank {r} repeated")));
            }
        }
        Ok(Self { ranks })
    }

    /// Builds a policy from actions listed most-preferred first.
    pub fn from_order(order: &[ActionType]) -> Result<Self> {
        let n = order.len();
        let mut ranks = vec![usize::MAX; n];
        for (rank, action) in order.iter().enumerate() {
            let slot = ranks.get_mut(action.index()).ok_or_else(|| {
                PlanError::InvalidRanks(format!("action {action} out of range for {n} actions"))
            })?;
            if *slot != usize::MAX {
                return Err(PlanError::InvalidRanks(format!("action {action} listed twice")));
            }
            *slot = rank;
        }
        Self::from_ranks(ranks)
    }

    /// Number of ranked actions, refresh included.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn rank(&self, action: ActionType) -> usize {
        self.ranks[action.index()]
    }

    /// Actions sorted most-preferred first.
    pub fn order(&self) -> Vec<ActionType> {
        let mut order = vec![ActionType::Refresh; self.ranks.len()];
        for (index, &rank) in self.ranks.iter().enumerate() {
            order[rank] = ActionType::from_index(index);
        }
        order
    }

    /// Encodes the policy as whitespace-separated codes, most-preferred
    /// first.
    ///
    /// # Panics
    /// Panics if the policy ranks more actions than `catalog` holds.
    pub fn encode(&self, catalog: &Catalog) -> String {
        self.order()
            .into_iter()
            .map(|a| catalog.code(a))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Decodes the text form produced by [`encode`](Self::encode).
    ///
    /// The code list must name every catalog action exactly once.
    pub fn decode(text: &str, catalog: &Catalog) -> Result<Self> {
        let codes: Vec<&str> = text.split_whitespace().collect();
        if codes.len() != catalog.len() {
            return Err(PlanError::DimensionMismatch {
                what: "policy code list",
                expected: catalog.len(),
                found: codes.len(),
            });
        }
        let mut order = Vec::with_capacity(codes.len());
        for code in codes {
            let action = catalog
                .lookup(code)
                .ok_or_else(|| PlanError::UnknownCode(code.to_string()))?;
            if order.contains(&action) {
                return Err(PlanError::DuplicateCode(code.to_string()));
            }
            order.push(action);
        }
        Self::from_order(&order)
    }

    /// Decodes the newest entry of an append-only history, one encoded
    /// policy per line.
    pub fn decode_latest(history: &str, catalog: &Catalog) -> Result<Self> {
        let last = history
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("");
        Self::decode(last, catalog)
    }
}

impl Policy for RankPolicy {
    fn decide(&self, status: &SimStatus, offers: &[ActionType]) -> ActionType {
        let mut best = ActionType::Refresh;
        let mut best_rank = self.ranks.len();
        for &action in offers {
            let rank = self.ranks[action.index()];
            if rank < best_rank {
                best = action;
                best_rank = rank;
            }
        }
        if best_rank > self.ranks[ActionType::Refresh.index()] && status.can_refresh() {
            return ActionType::Refresh;
        }
        best
    }

    fn action_count(&self) -> usize {
        self.ranks.len()
    }

    /// Swaps the ranks of two distinct, uniformly chosen actions.
    fn mutate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let n = self.ranks.len();
        let mut ranks = self.ranks.clone();
        if n >= 2 {
            let a = rng.random_range(0..n);
            let mut b = rng.random_range(0..n - 1);
            if b >= a {
                b += 1;
            }
            ranks.swap(a, b);
        }
        Self { ranks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::time::Duration;

    fn catalog() -> Catalog {
        Catalog::from_table("code,duration,rate,gain\nA,1,1,1\nB,2,1,3\nC,4,1,5\n").unwrap()
    }

    fn p(i: usize) -> ActionType {
        ActionType::Project(i)
    }

    #[test]
    fn test_picks_lowest_rank() {
        // Order: C, A, refresh, B
        let policy = RankPolicy::from_ranks(vec![2, 1, 3, 0]).unwrap();
        let status = SimStatus::new(4, 1);
        assert_eq!(policy.decide(&status, &[p(1), p(3), p(2)]), p(3));
        assert_eq!(policy.decide(&status, &[p(1), p(2)]), p(1));
    }

    #[test]
    fn test_refresh_when_offers_rank_below_refresh() {
        let policy = RankPolicy::from_ranks(vec![2, 1, 3, 0]).unwrap();
        let status = SimStatus::new(4, 1);
        assert_eq!(policy.decide(&status, &[p(2), p(2)]), ActionType::Refresh);
    }

    #[test]
    fn test_no_refresh_when_not_eligible() {
        let policy = RankPolicy::from_ranks(vec![2, 1, 3, 0]).unwrap();
        let status = SimStatus::new(4, 1)
            .at(Duration::from_secs(5 * 3600))
            .with_last_refresh_day(Some(0));
        assert_eq!(policy.decide(&status, &[p(2), p(2)]), p(2));
    }

    #[test]
    fn test_empty_offers_fall_back_to_refresh() {
        let policy = RankPolicy::identity(4);
        let status = SimStatus::new(4, 1).with_last_refresh_day(Some(0));
        assert_eq!(policy.decide(&status, &[]), ActionType::Refresh);
    }

    #[test]
    fn test_from_ranks_rejects_non_permutation() {
        assert!(RankPolicy::from_ranks(vec![0, 0, 1]).is_err());
        assert!(RankPolicy::from_ranks(vec![0, 3, 1]).is_err());
        assert!(RankPolicy::from_ranks(vec![]).is_err());
    }

    #[test]
    fn test_order_inverts_ranks() {
        let policy = RankPolicy::from_ranks(vec![2, 0, 1]).unwrap();
        assert_eq!(policy.order(), vec![p(1), p(2), ActionType::Refresh]);
        assert_eq!(RankPolicy::from_order(&policy.order()).unwrap(), policy);
    }

    #[test]
    fn test_encode_decode() {
        let catalog = catalog();
        let policy = RankPolicy::from_ranks(vec![2, 1, 3, 0]).unwrap();
        let text = policy.encode(&catalog);
        assert_eq!(text, "C A SKIP B");
        assert_eq!(RankPolicy::decode(&text, &catalog).unwrap(), policy);
    }

    #[test]
    fn test_decode_errors() {
        let catalog = catalog();
        assert!(matches!(
            RankPolicy::decode("C A SKIP", &catalog),
            Err(PlanError::DimensionMismatch {
                expected: 4,
                found: 3,
                ..
            })
        ));
        assert!(matches!(
            RankPolicy::decode("C A SKIP X", &catalog),
            Err(PlanError::UnknownCode(code)) if code == "X"
        ));
        assert!(matches!(
            RankPolicy::decode("C A SKIP A", &catalog),
            Err(PlanError::DuplicateCode(code)) if code == "A"
        ));
    }

    #[test]
    fn test_decode_latest_uses_last_line() {
        let catalog = catalog();
        let history = "A B C SKIP\nC A SKIP B\n\n";
        let policy = RankPolicy::decode_latest(history, &catalog).unwrap();
        assert_eq!(policy.encode(&catalog), "C A SKIP B");
    }

    #[test]
    fn test_round_trip_preserves_decisions() {
        let catalog = catalog();
        let mut rng = create_rng(11);
        let policy = RankPolicy::shuffled(catalog.len(), &mut rng);
        let decoded = RankPolicy::decode(&policy.encode(&catalog), &catalog).unwrap();

        let fresh = SimStatus::new(4, 1);
        let spent = SimStatus::new(4, 1).with_last_refresh_day(Some(0));
        for _ in 0..200 {
            let offers = catalog.sample_offers(3, &mut rng);
            for status in [&fresh, &spent] {
                assert_eq!(policy.decide(status, &offers), decoded.decide(status, &offers));
            }
        }
    }

    #[test]
    fn test_mutate_leaves_parent_untouched() {
        let policy = RankPolicy::identity(5);
        let child = policy.mutate(&mut create_rng(3));
        assert_eq!(policy, RankPolicy::identity(5));
        assert_ne!(child, policy);
    }

    #[test]
    fn test_mutate_single_action() {
        let policy = RankPolicy::identity(1);
        assert_eq!(policy.mutate(&mut create_rng(3)), policy);
    }

    proptest! {
        #[test]
        fn prop_mutation_is_single_swap(n in 2usize..40, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let parent = RankPolicy::shuffled(n, &mut rng);
            let child = parent.mutate(&mut rng);

            let mut sorted = child.ranks().to_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());

            let diffs: Vec<usize> = (0..n)
                .filter(|&i| parent.ranks()[i] != child.ranks()[i])
                .collect();
            prop_assert_eq!(diffs.len(), 2);
            prop_assert_eq!(parent.ranks()[diffs[0]], child.ranks()[diffs[1]]);
            prop_assert_eq!(parent.ranks()[diffs[1]], child.ranks()[diffs[0]]);
        }
    }
}
