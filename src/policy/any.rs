//! Tagged union over the policy representations.

use super::rank::RankPolicy;
use super::switch::TimeSwitchPolicy;
use super::types::Policy;
use crate::catalog::ActionType;
use crate::sim::SimStatus;
use rand::Rng;

/// Either policy representation, for callers that pick one at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyPolicy {
    Rank(RankPolicy),
    TimeSwitch(TimeSwitchPolicy),
}

impl From<RankPolicy> for AnyPolicy {
    fn from(p: RankPolicy) -> Self {
        AnyPolicy::Rank(p)
    }
}

impl From<TimeSwitchPolicy> for AnyPolicy {
    fn from(p: TimeSwitchPolicy) -> Self {
        AnyPolicy::TimeSwitch(p)
    }
}

impl Policy for AnyPolicy {
    fn decide(&self, status: &SimStatus, offers: &[ActionType]) -> ActionType {
        match self {
            AnyPolicy::Rank(p) => p.decide(status, offers),
            AnyPolicy::TimeSwitch(p) => p.decide(status, offers),
        }
    }

    fn action_count(&self) -> usize {
        match self {
            AnyPolicy::Rank(p) => p.action_count(),
            AnyPolicy::TimeSwitch(p) => p.action_count(),
        }
    }

    fn mutate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        match self {
            AnyPolicy::Rank(p) => AnyPolicy::Rank(p.mutate(rng)),
            AnyPolicy::TimeSwitch(p) => AnyPolicy::TimeSwitch(p.mutate(rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_mutation_keeps_variant() {
        let mut rng = create_rng(1);
        let rank: AnyPolicy = RankPolicy::identity(4).into();
        assert!(matches!(rank.mutate(&mut rng), AnyPolicy::Rank(_)));

        let switch: AnyPolicy = TimeSwitchPolicy::uniform(RankPolicy::identity(4)).into();
        assert!(matches!(switch.mutate(&mut rng), AnyPolicy::TimeSwitch(_)));
    }

    #[test]
    fn test_delegates_decision() {
        let inner = RankPolicy::from_ranks(vec![3, 0, 1, 2]).unwrap();
        let any = AnyPolicy::from(inner.clone());
        let status = SimStatus::new(4, 0);
        let offers = [ActionType::Project(2), ActionType::Project(3)];
        assert_eq!(any.decide(&status, &offers), inner.decide(&status, &offers));
        assert_eq!(any.action_count(), 4);
    }
}
