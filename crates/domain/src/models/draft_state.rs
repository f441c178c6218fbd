use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::DraftPick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftStatus {
    NotStarted,
    InProgress,
    Paused,
    Completed,
    Cancelled,
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftStatus::NotStarted => write!(f, "NOT_STARTED"),
            DraftStatus::InProgress => write!(f, "IN_PROGRESS"),
            DraftStatus::Paused => write!(f, "PAUSED"),
            DraftStatus::Completed => write!(f, "COMPLETED"),
            DraftStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for DraftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(DraftStatus::NotStarted),
            "IN_PROGRESS" => Ok(DraftStatus::InProgress),
            "PAUSED" => Ok(DraftStatus::Paused),
            "COMPLETED" => Ok(DraftStatus::Completed),
            "CANCELLED" => Ok(DraftStatus::Cancelled),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid draft status: {}",
                s
            ))),
        }
    }
}

/// Authoritative per-league draft state.
///
/// The stored `status` never holds `Paused`: a paused draft is
/// `(InProgress, is_paused = true)`, and [`DraftState::effective_status`]
/// derives the `Paused` view for clients. That keeps the pair of fields a
/// single fact with two projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    pub league_id: Uuid,
    pub status: DraftStatus,
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

impl DraftState {
    pub fn initial(league_id: Uuid) -> Self {
        Self {
            league_id,
            status: DraftStatus::NotStarted,
            current_round: 1,
            current_pick: 1,
            current_team_id: None,
            is_paused: false,
            pause_reason: None,
            timer_seconds_remaining: None,
            timer_started_at: None,
            last_pick_id: None,
            undo_available: false,
            started_at: None,
            completed_at: None,
            last_activity_at: Utc::now(),
        }
    }

    /// Status as reported to clients: `Paused` while `is_paused` is set.
    pub fn effective_status(&self) -> DraftStatus {
        if self.status == DraftStatus::InProgress && self.is_paused {
            DraftStatus::Paused
        } else {
            self.status
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == DraftStatus::InProgress && !self.is_paused
    }

    pub fn start(&mut self, first_pick: &DraftPick, timer_seconds: i32) -> DomainResult<()> {
        match self.status {
            DraftStatus::NotStarted => {
                let now = Utc::now();
                self.status = DraftStatus::InProgress;
                self.current_round = first_pick.round;
                self.current_pick = first_pick.overall_pick;
                self.current_team_id = Some(first_pick.current_owner_team_id);
                self.is_paused = false;
                self.pause_reason = None;
                self.timer_seconds_remaining = Some(timer_seconds);
                self.timer_started_at = Some(now);
                self.started_at = Some(now);
                self.last_activity_at = now;
                Ok(())
            }
            DraftStatus::InProgress => Err(DomainError::InvalidState(
                "Draft is already in progress".to_string(),
            )),
            DraftStatus::Paused => Err(DomainError::InvalidState(
                "Draft is paused; resume it instead".to_string(),
            )),
            DraftStatus::Completed => Err(DomainError::InvalidState(
                "Draft is already completed".to_string(),
            )),
            DraftStatus::Cancelled => Err(DomainError::InvalidState(
                "Draft has been cancelled".to_string(),
            )),
        }
    }

    /// Pause, banking the residual seconds computed by the caller from the
    /// wall clock.
    pub fn pause(&mut self, reason: Option<String>, residual_seconds: i32) -> DomainResult<()> {
        if !self.is_live() {
            return Err(DomainError::InvalidState(format!(
                "Cannot pause a draft that is {}",
                self.effective_status()
            )));
        }

        self.is_paused = true;
        self.pause_reason = reason;
        self.timer_seconds_remaining = Some(residual_seconds.max(0));
        self.timer_started_at = None;
        self.last_activity_at = Utc::now();
        Ok(())
    }

    pub fn resume(&mut self) -> DomainResult<()> {
        if self.status != DraftStatus::InProgress || !self.is_paused {
            return Err(DomainError::InvalidState(format!(
                "Cannot resume a draft that is {}",
                self.effective_status()
            )));
        }

        self.is_paused = false;
        self.pause_reason = None;
        self.timer_started_at = Some(Utc::now());
        self.last_activity_at = Utc::now();
        Ok(())
    }

    /// Put the given pick on the clock with a full timer.
    pub fn advance_to(&mut self, pick: &DraftPick, timer_seconds: i32) {
        let now = Utc::now();
        self.current_round = pick.round;
        self.current_pick = pick.overall_pick;
        self.current_team_id = Some(pick.current_owner_team_id);
        self.timer_seconds_remaining = Some(timer_seconds);
        self.timer_started_at = if self.is_paused { None } else { Some(now) };
        self.last_activity_at = now;
    }

    pub fn complete(&mut self) {
        let now = Utc::now();
        self.status = DraftStatus::Completed;
        self.is_paused = false;
        self.pause_reason = None;
        self.current_team_id = None;
        self.timer_seconds_remaining = None;
        self.timer_started_at = None;
        self.completed_at = Some(now);
        self.last_activity_at = now;
    }

    /// Record a committed selection for the one-level undo window.
    pub fn mark_selection(&mut self, pick_id: Uuid) {
        self.last_pick_id = Some(pick_id);
        self.undo_available = true;
        self.last_activity_at = Utc::now();
    }

    /// Any trade, pause, resume or reset invalidates the undo window.
    pub fn clear_undo(&mut self) {
        self.last_pick_id = None;
        self.undo_available = false;
    }

    /// Re-open the given pick after a commissioner undo. Clears any pause
    /// and the completed marker; the undone pick goes back on the clock.
    pub fn reopen_pick(&mut self, pick: &DraftPick, timer_seconds: i32) -> DomainResult<()> {
        match self.status {
            DraftStatus::InProgress | DraftStatus::Completed => {
                let now = Utc::now();
                self.status = DraftStatus::InProgress;
                self.is_paused = false;
                self.pause_reason = None;
                self.current_round = pick.round;
                self.current_pick = pick.overall_pick;
                self.current_team_id = Some(pick.current_owner_team_id);
                self.timer_seconds_remaining = Some(timer_seconds);
                self.timer_started_at = Some(now);
                self.completed_at = None;
                self.last_pick_id = None;
                self.undo_available = false;
                self.last_activity_at = now;
                Ok(())
            }
            DraftStatus::NotStarted | DraftStatus::Cancelled | DraftStatus::Paused => {
                Err(DomainError::InvalidState(format!(
                    "Cannot undo a pick while the draft is {}",
                    self.effective_status()
                )))
            }
        }
    }
}
