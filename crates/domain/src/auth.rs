use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainResult;

/// Authenticated identity resolved from a session token upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// A user's standing within one league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueMembership {
    pub is_member: bool,
    pub is_commissioner: bool,
    pub team_id: Option<Uuid>,
}

/// Contract the subscription hub consults before any intent is routed.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn identify(&self, session_token: &str) -> DomainResult<SessionIdentity>;

    async fn league_membership(
        &self,
        user_id: Uuid,
        league_id: Uuid,
    ) -> DomainResult<LeagueMembership>;
}

/// The party a state-changing operation runs on behalf of. Resolved by the
/// hub before the intent enters the coordinator queue; the timer uses
/// [`Actor::system`] for auto-picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub is_commissioner: bool,
}

impl Actor {
    pub fn member(user_id: Uuid, team_id: Option<Uuid>, is_commissioner: bool) -> Self {
        Self {
            user_id: Some(user_id),
            team_id,
            is_commissioner,
        }
    }

    /// Internal actor for timer-driven decisions; carries commissioner
    /// authority so expiry can pick for whichever team is on the clock.
    pub fn system() -> Self {
        Self {
            user_id: None,
            team_id: None,
            is_commissioner: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_actor_is_commissioner() {
        let actor = Actor::system();
        assert!(actor.is_commissioner);
        assert!(actor.user_id.is_none());
    }
}
