//! Campaign state machine: one explicit transition table consulted by
//! every mutating entry point.
//!
//! ENDED is terminal. It is never produced by any operation here; rows can
//! only carry it through manual data edits, and every action on an ENDED
//! campaign is rejected.

use crate::errors::{CampaignHubError, Result};
use crate::storage::models::CampaignStatus;

/// 会改变状态的生命周期动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Publish,
    Pause,
}

/// 迁移策略开关（来自 AppConfig）
#[derive(Debug, Clone, Copy)]
pub struct TransitionPolicy {
    /// 是否允许暂停 DRAFT 状态的活动
    pub allow_pause_from_draft: bool,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        TransitionPolicy {
            allow_pause_from_draft: true,
        }
    }
}

/// 迁移合法性检查，返回目标状态或 Conflict
pub fn check_transition(
    action: LifecycleAction,
    from: CampaignStatus,
    policy: TransitionPolicy,
) -> Result<CampaignStatus> {
    use CampaignStatus::*;
    use LifecycleAction::*;

    match (action, from) {
        (Publish, Draft | Pending | Paused) => Ok(Active),
        (Publish, Active) => Err(CampaignHubError::conflict("Campaign is already active")),

        (Pause, Active | Pending) => Ok(Paused),
        (Pause, Draft) if policy.allow_pause_from_draft => Ok(Paused),
        (Pause, Draft) => Err(CampaignHubError::conflict(
            "Draft campaigns cannot be paused",
        )),
        (Pause, Paused) => Err(CampaignHubError::conflict("Campaign is already paused")),

        (_, Ended) => Err(CampaignHubError::conflict("Campaign has ended")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CampaignStatus::*;
    use LifecycleAction::*;

    fn default_policy() -> TransitionPolicy {
        TransitionPolicy::default()
    }

    #[test]
    fn test_publish_from_draft_pending_paused() {
        for from in [Draft, Pending, Paused] {
            assert_eq!(check_transition(Publish, from, default_policy()).unwrap(), Active);
        }
    }

    #[test]
    fn test_publish_when_active_is_conflict() {
        let err = check_transition(Publish, Active, default_policy()).unwrap_err();
        assert!(matches!(err, CampaignHubError::Conflict(_)));
        assert_eq!(err.message(), "Campaign is already active");
    }

    #[test]
    fn test_pause_from_active() {
        assert_eq!(check_transition(Pause, Active, default_policy()).unwrap(), Paused);
        assert_eq!(check_transition(Pause, Pending, default_policy()).unwrap(), Paused);
    }

    #[test]
    fn test_pause_from_draft_is_policy_gated() {
        assert_eq!(check_transition(Pause, Draft, default_policy()).unwrap(), Paused);

        let strict = TransitionPolicy {
            allow_pause_from_draft: false,
        };
        let err = check_transition(Pause, Draft, strict).unwrap_err();
        assert!(matches!(err, CampaignHubError::Conflict(_)));
    }

    #[test]
    fn test_pause_when_paused_is_conflict() {
        assert!(check_transition(Pause, Paused, default_policy()).is_err());
    }

    #[test]
    fn test_ended_is_terminal() {
        assert!(check_transition(Publish, Ended, default_policy()).is_err());
        assert!(check_transition(Pause, Ended, default_policy()).is_err());
    }
}
