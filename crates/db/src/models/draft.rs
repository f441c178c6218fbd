use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{DraftPick, DraftState};

use crate::errors::{DbError, DbResult};

/// Database model for the draft_picks table.
#[derive(Debug, Clone, FromRow)]
pub struct PickRow {
    pub id: Uuid,
    pub league_id: Uuid,
    pub season: i32,
    pub round: i32,
    pub pick_in_round: i32,
    pub overall_pick: i32,
    pub original_owner_team_id: Uuid,
    pub current_owner_team_id: Uuid,
    pub selected_player_id: Option<Uuid>,
    pub selected_at: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

impl PickRow {
    pub fn from_domain(pick: &DraftPick) -> Self {
        Self {
            id: pick.id,
            league_id: pick.league_id,
            season: pick.season,
            round: pick.round,
            pick_in_round: pick.pick_in_round,
            overall_pick: pick.overall_pick,
            original_owner_team_id: pick.original_owner_team_id,
            current_owner_team_id: pick.current_owner_team_id,
            selected_player_id: pick.selected_player_id,
            selected_at: pick.selected_at,
            is_complete: pick.is_complete,
        }
    }

    pub fn to_domain(&self) -> DraftPick {
        DraftPick {
            id: self.id,
            league_id: self.league_id,
            season: self.season,
            round: self.round,
            pick_in_round: self.pick_in_round,
            overall_pick: self.overall_pick,
            original_owner_team_id: self.original_owner_team_id,
            current_owner_team_id: self.current_owner_team_id,
            selected_player_id: self.selected_player_id,
            selected_at: self.selected_at,
            is_complete: self.is_complete,
        }
    }
}

/// Database model for the draft_states table (one row per league).
#[derive(Debug, Clone, FromRow)]
pub struct DraftStateRow {
    pub league_id: Uuid,
    pub status: String,
    pub current_round: i32,
    pub current_pick: i32,
    pub current_team_id: Option<Uuid>,
    pub is_paused: bool,
    pub pause_reason: Option<String>,
    pub timer_seconds_remaining: Option<i32>,
    pub timer_started_at: Option<DateTime<Utc>>,
    pub last_pick_id: Option<Uuid>,
    pub undo_available: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_activity_at: DateTime<Utc>,
}

impl DraftStateRow {
    pub fn from_domain(state: &DraftState) -> Self {
        Self {
            league_id: state.league_id,
            status: state.status.to_string(),
            current_round: state.current_round,
            current_pick: state.current_pick,
            current_team_id: state.current_team_id,
            is_paused: state.is_paused,
            pause_reason: state.pause_reason.clone(),
            timer_seconds_remaining: state.timer_seconds_remaining,
            timer_started_at: state.timer_started_at,
            last_pick_id: state.last_pick_id,
            undo_available: state.undo_available,
            started_at: state.started_at,
            completed_at: state.completed_at,
            last_activity_at: state.last_activity_at,
        }
    }

    pub fn to_domain(&self) -> DbResult<DraftState> {
        Ok(DraftState {
            league_id: self.league_id,
            status: self
                .status
                .parse()
                .map_err(|e: domain::DomainError| DbError::MappingError(e.to_string()))?,
            current_round: self.current_round,
            current_pick: self.current_pick,
            current_team_id: self.current_team_id,
            is_paused: self.is_paused,
            pause_reason: self.pause_reason.clone(),
            timer_seconds_remaining: self.timer_seconds_remaining,
            timer_started_at: self.timer_started_at,
            last_pick_id: self.last_pick_id,
            undo_available: self.undo_available,
            started_at: self.started_at,
            completed_at: self.completed_at,
            last_activity_at: self.last_activity_at,
        })
    }
}
