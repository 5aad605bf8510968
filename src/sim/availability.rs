//! Time-of-day availability rules.

use crate::error::{PlanError, Result};
use std::time::Duration;

pub(crate) const HOUR: Duration = Duration::from_secs(3600);
pub(crate) const DAY: Duration = Duration::from_secs(24 * 3600);

/// Determines the earliest simulated time at which the actor may act.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_offerplan::sim::Availability;
///
/// let h = |n: u64| Duration::from_secs(n * 3600);
/// let rule = Availability::day_night();
/// assert_eq!(rule.next_available(h(3)), h(8));
/// assert_eq!(rule.next_available(h(12)), h(12));
/// assert_eq!(rule.next_available(h(23)), h(24 + 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Availability {
    /// The actor can always act.
    #[default]
    AlwaysOn,

    /// The actor sleeps outside `[open_hour, close_hour)`.
    ///
    /// A time before `open_hour` is pushed to `open_hour:00` the same day;
    /// a time at or after `close_hour` is pushed to `open_hour:00` the
    /// next day.
    DayNight {
        /// First available hour of the day.
        open_hour: u32,
        /// First unavailable hour of the evening, at most 24.
        close_hour: u32,
    },
}

impl Availability {
    /// The 08:00–23:00 day/night rule.
    pub const fn day_night() -> Self {
        Availability::DayNight {
            open_hour: 8,
            close_hour: 23,
        }
    }

    /// Earliest time at or after `t` at which the actor may act.
    pub fn next_available(&self, t: Duration) -> Duration {
        match *self {
            Availability::AlwaysOn => t,
            Availability::DayNight {
                open_hour,
                close_hour,
            } => {
                let hour = t.as_secs() / HOUR.as_secs();
                let hour_of_day = hour % 24;
                let open = u64::from(open_hour);
                if hour_of_day < open {
                    Duration::from_secs((hour + open - hour_of_day).saturating_mul(HOUR.as_secs()))
                } else if hour_of_day >= u64::from(close_hour) {
                    Duration::from_secs(
                        (hour + 24 + open - hour_of_day).saturating_mul(HOUR.as_secs()),
                    )
                } else {
                    t
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Availability::DayNight {
            open_hour,
            close_hour,
        } = *self
        {
            if open_hour >= close_hour || close_hour > 24 {
                return Err(PlanError::InvalidConfig(format!(
                    "day/night hours must satisfy open < close <= 24, got {open_hour}..{close_hour}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u64) -> Duration {
        Duration::from_secs(n * 3600)
    }

    #[test]
    fn test_always_on_identity() {
        let t = h(3) + Duration::from_secs(17);
        assert_eq!(Availability::AlwaysOn.next_available(t), t);
    }

    #[test]
    fn test_day_night_morning_clamp() {
        let rule = Availability::day_night();
        assert_eq!(rule.next_available(Duration::ZERO), h(8));
        assert_eq!(rule.next_available(h(24 * 3 + 7) + Duration::from_secs(59)), h(24 * 3 + 8));
    }

    #[test]
    fn test_day_night_evening_clamp() {
        let rule = Availability::day_night();
        assert_eq!(rule.next_available(h(23)), h(32));
        assert_eq!(rule.next_available(h(24 * 2 + 23) + Duration::from_secs(1800)), h(24 * 3 + 8));
    }

    #[test]
    fn test_day_night_daytime_identity() {
        let rule = Availability::day_night();
        let t = h(24 + 8);
        assert_eq!(rule.next_available(t), t);
        let t = h(22) + Duration::from_secs(3599);
        assert_eq!(rule.next_available(t), t);
    }

    #[test]
    fn test_validate() {
        assert!(Availability::day_night().validate().is_ok());
        assert!(Availability::DayNight {
            open_hour: 10,
            close_hour: 9
        }
        .validate()
        .is_err());
        assert!(Availability::DayNight {
            open_hour: 0,
            close_hour: 25
        }
        .validate()
        .is_err());
    }
}
