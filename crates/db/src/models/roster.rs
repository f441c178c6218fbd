use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::RosterEntry;

use crate::errors::{DbError, DbResult};

/// Database model for the roster_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct RosterRow {
    pub id: Uuid,
    pub league_id: Uuid,
    pub team_id: Uuid,
    pub player_id: Uuid,
    pub is_keeper: bool,
    pub keeper_round: Option<i32>,
    pub acquired_via: String,
    pub acquired_at: DateTime<Utc>,
}

impl RosterRow {
    pub fn from_domain(entry: &RosterEntry) -> Self {
        Self {
            id: entry.id,
            league_id: entry.league_id,
            team_id: entry.team_id,
            player_id: entry.player_id,
            is_keeper: entry.is_keeper,
            keeper_round: entry.keeper_round,
            acquired_via: entry.acquired_via.to_string(),
            acquired_at: entry.acquired_at,
        }
    }

    pub fn to_domain(&self) -> DbResult<RosterEntry> {
        Ok(RosterEntry {
            id: self.id,
            league_id: self.league_id,
            team_id: self.team_id,
            player_id: self.player_id,
            is_keeper: self.is_keeper,
            keeper_round: self.keeper_round,
            acquired_via: self
                .acquired_via
                .parse()
                .map_err(|e: domain::DomainError| DbError::MappingError(e.to_string()))?,
            acquired_at: self.acquired_at,
        })
    }
}
