use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{LeagueSettings, RosterSettings};

use crate::errors::{DbError, DbResult};

/// Database model for the leagues table.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueRow {
    pub id: Uuid,
    pub name: String,
    pub season: i32,
    pub max_teams: i32,
    pub commissioner_user_id: Uuid,
    pub roster_starters: serde_json::Value,
    pub roster_bench: i32,
    pub draft_type: String,
    pub total_rounds: i32,
    pub timer_seconds: i32,
    pub reserve_seconds: i32,
    pub pause_on_trade: bool,
    pub max_keepers: i32,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub keeper_deadline: Option<DateTime<Utc>>,
}

impl LeagueRow {
    pub fn to_domain(&self) -> DbResult<LeagueSettings> {
        let starters = serde_json::from_value(self.roster_starters.clone())
            .map_err(|e| DbError::MappingError(format!("roster starters: {}", e)))?;

        Ok(LeagueSettings {
            id: self.id,
            name: self.name.clone(),
            season: self.season,
            max_teams: self.max_teams,
            commissioner_user_id: self.commissioner_user_id,
            roster: RosterSettings {
                starters,
                bench: self.roster_bench,
            },
            draft_type: self
                .draft_type
                .parse()
                .map_err(|e: domain::DomainError| DbError::MappingError(e.to_string()))?,
            total_rounds: self.total_rounds,
            timer_seconds: self.timer_seconds,
            reserve_seconds: self.reserve_seconds,
            pause_on_trade: self.pause_on_trade,
            max_keepers: self.max_keepers,
            scheduled_start: self.scheduled_start,
            keeper_deadline: self.keeper_deadline,
        })
    }
}
