use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcquisitionKind {
    Drafted,
    Keeper,
    Traded,
    FreeAgent,
}

impl std::fmt::Display for AcquisitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionKind::Drafted => write!(f, "DRAFTED"),
            AcquisitionKind::Keeper => write!(f, "KEEPER"),
            AcquisitionKind::Traded => write!(f, "TRADED"),
            AcquisitionKind::FreeAgent => write!(f, "FREE_AGENT"),
        }
    }
}

impl std::str::FromStr for AcquisitionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFTED" => Ok(AcquisitionKind::Drafted),
            "KEEPER" => Ok(AcquisitionKind::Keeper),
            "TRADED" => Ok(AcquisitionKind::Traded),
            "FREE_AGENT" => Ok(AcquisitionKind::FreeAgent),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid acquisition kind: {}",
                s
            ))),
        }
    }
}

/// One player on one team. A player appears at most once per league, which
/// is what makes the roster table double as the draft-availability index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: Uuid,
    pub league_id: Uuid,
    pub team_id: Uuid,
    pub player_id: Uuid,
    pub is_keeper: bool,
    pub keeper_round: Option<i32>,
    pub acquired_via: AcquisitionKind,
    pub acquired_at: DateTime<Utc>,
}

impl RosterEntry {
    pub fn drafted(league_id: Uuid, team_id: Uuid, player_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            team_id,
            player_id,
            is_keeper: false,
            keeper_round: None,
            acquired_via: AcquisitionKind::Drafted,
            acquired_at: Utc::now(),
        }
    }

    pub fn keeper(league_id: Uuid, team_id: Uuid, player_id: Uuid, keeper_round: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            team_id,
            player_id,
            is_keeper: true,
            keeper_round: Some(keeper_round),
            acquired_via: AcquisitionKind::Keeper,
            acquired_at: Utc::now(),
        }
    }

    /// Move the entry to another team through a trade; keeper status rides
    /// along with the player.
    pub fn traded_to(&self, team_id: Uuid) -> Self {
        Self {
            id: self.id,
            league_id: self.league_id,
            team_id,
            player_id: self.player_id,
            is_keeper: self.is_keeper,
            keeper_round: self.keeper_round,
            acquired_via: AcquisitionKind::Traded,
            acquired_at: Utc::now(),
        }
    }
}
