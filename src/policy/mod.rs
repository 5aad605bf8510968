//! Decision policies and their neighbor operators.
//!
//! - [`RankPolicy`]: a priority permutation over all actions; mutation
//!   swaps the ranks of two actions.
//! - [`TimeSwitchPolicy`]: two rank policies split at an hour of day;
//!   mutation moves the switch hour or mutates one sub-policy.
//! - [`AnyPolicy`]: runtime choice between the two.
//!
//! Every mutation returns a new policy and leaves its receiver untouched.

mod any;
mod rank;
mod switch;
mod types;

pub use any::AnyPolicy;
pub use rank::RankPolicy;
pub use switch::{TimeSwitchPolicy, TimeSwitchRecord, DEFAULT_SWITCH_HOURS};
pub use types::Policy;
