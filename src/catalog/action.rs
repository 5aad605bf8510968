//! Action identifiers.

use std::fmt;

/// One kind of operation the actor may perform.
///
/// The refresh action ("discard the current offers and wait for a new
/// draw") is a named variant rather than a magic index, but it still
/// occupies slot 0 of every dense per-action array (ranks, counts).
///
/// # Examples
///
/// ```
/// use u_offerplan::catalog::ActionType;
///
/// assert_eq!(ActionType::Refresh.index(), 0);
/// assert_eq!(ActionType::from_index(3), ActionType::Project(3));
/// assert!(ActionType::from_index(0).is_refresh());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Wait for a new offer. Zero duration, zero cost/gain.
    Refresh,

    /// A catalog project at dense index `i >= 1`.
    Project(usize),
}

impl ActionType {
    /// Dense catalog index: 0 for refresh, `i` for `Project(i)`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ActionType::Refresh => 0,
            ActionType::Project(i) => i,
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        if index == 0 {
            ActionType::Refresh
        } else {
            ActionType::Project(index)
        }
    }

    #[inline]
    pub const fn is_refresh(self) -> bool {
        matches!(self, ActionType::Refresh)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Refresh => write!(f, "refresh"),
            ActionType::Project(i) => write!(f, "#{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for i in 0..10 {
            assert_eq!(ActionType::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_only_slot_zero_is_refresh() {
        assert!(ActionType::Refresh.is_refresh());
        assert!(!ActionType::Project(1).is_refresh());
    }
}
