//! Audit stamp: who performed an action and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A who/when pair recorded for every lifecycle event.
///
/// Used uniformly for creation, update, lock, approve, pay, and retire
/// bookkeeping instead of scattering nullable actor/timestamp field pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStamp {
    /// The user who performed the action.
    pub actor: UserId,
    /// When the action was performed.
    pub at: DateTime<Utc>,
}

impl AuditStamp {
    /// Creates a stamp for the given actor at the current time.
    #[must_use]
    pub fn now(actor: UserId) -> Self {
        Self {
            actor,
            at: Utc::now(),
        }
    }

    /// Creates a stamp with an explicit timestamp.
    #[must_use]
    pub const fn new(actor: UserId, at: DateTime<Utc>) -> Self {
        Self { actor, at }
    }
}

impl std::fmt::Display for AuditStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.actor, self.at.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_stamps_current_actor() {
        let actor = UserId::new();
        let before = Utc::now();
        let stamp = AuditStamp::now(actor);
        let after = Utc::now();

        assert_eq!(stamp.actor, actor);
        assert!(stamp.at >= before && stamp.at <= after);
    }

    #[test]
    fn test_display_contains_actor() {
        let actor = UserId::new();
        let stamp = AuditStamp::now(actor);
        assert!(stamp.to_string().contains(&actor.to_string()));
    }
}
