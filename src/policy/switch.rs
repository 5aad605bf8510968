//! Time-of-day composite policy.

use super::rank::RankPolicy;
use super::types::Policy;
use crate::catalog::{ActionType, Catalog};
use crate::error::{PlanError, Result};
use crate::sim::SimStatus;
use rand::Rng;
use std::sync::Arc;

/// Candidate switch hours used by [`TimeSwitchPolicy::new`].
pub const DEFAULT_SWITCH_HOURS: [u32; 5] = [18, 19, 20, 21, 22];

/// Probability that a mutation reselects the switch hour.
const SWITCH_HOUR_MUTATION: f64 = 0.2;
/// Upper bound of the draw that mutates the day policy instead.
const DAY_POLICY_MUTATION: f64 = 0.6;

/// Two rank policies and the hour of day at which control passes from the
/// first to the second.
///
/// Before the selected switch hour the day policy decides; from that hour
/// until midnight the evening policy decides. Sub-policies are held in
/// `Arc` so that a mutated child shares the sub-policy it did not change
/// with its parent.
///
/// # Examples
///
/// ```
/// use u_offerplan::policy::{RankPolicy, TimeSwitchPolicy};
///
/// let policy = TimeSwitchPolicy::new(RankPolicy::identity(4), RankPolicy::identity(4)).unwrap();
/// assert_eq!(policy.switch_hour(), 18);
/// assert_eq!(policy.switch_hours(), &[18, 19, 20, 21, 22]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSwitchPolicy {
    switch_hours: Arc<[u32]>,
    selected: usize,
    subs: [Arc<RankPolicy>; 2],
}

/// Persisted form of a [`TimeSwitchPolicy`].
///
/// Sub-policies are stored as encoded code lists so that decoding can
/// re-link them to the active catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSwitchRecord {
    pub switch_hours: Vec<u32>,
    pub switch_hour: u32,
    pub policies: [String; 2],
}

impl TimeSwitchPolicy {
    /// Combines `day` and `evening` with the default switch hours, starting
    /// at the first candidate.
    ///
    /// Fails when the sub-policies rank different numbers of actions.
    pub fn new(day: RankPolicy, evening: RankPolicy) -> Result<Self> {
        if day.len() != evening.len() {
            return Err(PlanError::DimensionMismatch {
                what: "evening policy ranks",
                expected: day.len(),
                found: evening.len(),
            });
        }
        Ok(Self::from_parts(day, evening))
    }

    /// Both sub-policies start from the same ranking.
    pub fn uniform(policy: RankPolicy) -> Self {
        Self::from_parts(policy.clone(), policy)
    }

    fn from_parts(day: RankPolicy, evening: RankPolicy) -> Self {
        Self {
            switch_hours: Arc::from(DEFAULT_SWITCH_HOURS.as_slice()),
            selected: 0,
            subs: [Arc::new(day), Arc::new(evening)],
        }
    }

    /// Replaces the candidate hours and selects `switch_hour` among them.
    pub fn with_switch_hours(mut self, switch_hours: Vec<u32>, switch_hour: u32) -> Result<Self> {
        if let Some(&h) = switch_hours.iter().find(|&&h| h > 24) {
            return Err(PlanError::InvalidConfig(format!(
                "switch hours must be within 0..=24, got {h}"
            )));
        }
        let selected = switch_hours
            .iter()
            .position(|&h| h == switch_hour)
            .ok_or_else(|| PlanError::InvalidSwitchHour {
                hour: switch_hour,
                candidates: switch_hours.clone(),
            })?;
        self.switch_hours = Arc::from(switch_hours);
        self.selected = selected;
        Ok(self)
    }

    /// Hour of day at which the evening policy takes over.
    pub fn switch_hour(&self) -> u32 {
        self.switch_hours[self.selected]
    }

    pub fn switch_hours(&self) -> &[u32] {
        &self.switch_hours
    }

    /// Sub-policy 0 decides before the switch hour.
    pub fn day_policy(&self) -> &Arc<RankPolicy> {
        &self.subs[0]
    }

    /// Sub-policy 1 decides from the switch hour on.
    pub fn evening_policy(&self) -> &Arc<RankPolicy> {
        &self.subs[1]
    }

    /// The persisted form of this policy.
    pub fn to_record(&self, catalog: &Catalog) -> TimeSwitchRecord {
        TimeSwitchRecord {
            switch_hours: self.switch_hours.to_vec(),
            switch_hour: self.switch_hour(),
            policies: [self.subs[0].encode(catalog), self.subs[1].encode(catalog)],
        }
    }

    /// Rebuilds a policy from its record, re-linking both sub-policies to
    /// `catalog`.
    pub fn from_record(record: &TimeSwitchRecord, catalog: &Catalog) -> Result<Self> {
        let day = RankPolicy::decode(&record.policies[0], catalog)?;
        let evening = RankPolicy::decode(&record.policies[1], catalog)?;
        Self::new(day, evening)?.with_switch_hours(record.switch_hours.clone(), record.switch_hour)
    }

    /// Serializes the record form as JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self, catalog: &Catalog) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record(catalog))?)
    }

    /// Parses the JSON record form.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str, catalog: &Catalog) -> Result<Self> {
        let record: TimeSwitchRecord = serde_json::from_str(text)?;
        Self::from_record(&record, catalog)
    }
}

impl Policy for TimeSwitchPolicy {
    fn decide(&self, status: &SimStatus, offers: &[ActionType]) -> ActionType {
        if status.hour_of_day() < self.switch_hour() {
            self.subs[0].decide(status, offers)
        } else {
            self.subs[1].decide(status, offers)
        }
    }

    fn action_count(&self) -> usize {
        self.subs[0].len()
    }

    /// Reselects the switch hour (20%), or mutates the day policy (40%) or
    /// the evening policy (40%).
    fn mutate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut child = self.clone();
        let u: f64 = rng.random();
        if u < SWITCH_HOUR_MUTATION {
            child.selected = rng.random_range(0..self.switch_hours.len());
        } else if u < DAY_POLICY_MUTATION {
            child.subs[0] = Arc::new(self.subs[0].mutate(rng));
        } else {
            child.subs[1] = Arc::new(self.subs[1].mutate(rng));
        }
        child
    }
}
