use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// A franchise slot within a league. `owner_user_id` is `None` until a user
/// claims the slot through an invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub owner_user_id: Option<Uuid>,
    pub draft_position: i32,
}

impl Team {
    pub fn new(league_id: Uuid, name: String, draft_position: i32) -> DomainResult<Self> {
        Self::validate_draft_position(draft_position)?;

        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            name,
            owner_user_id: None,
            draft_position,
        })
    }

    pub fn with_owner(mut self, owner_user_id: Uuid) -> Self {
        self.owner_user_id = Some(owner_user_id);
        self
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_user_id == Some(user_id)
    }

    fn validate_draft_position(draft_position: i32) -> DomainResult<()> {
        if draft_position < 1 {
            return Err(DomainError::ValidationError(
                "Draft position must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
