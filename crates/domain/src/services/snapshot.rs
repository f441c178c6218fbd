use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::events::{PendingTradeView, StateSyncPayload};
use crate::models::{DraftState, LeagueSettings, RosterEntry};
use crate::repositories::{
    DraftStateRepository, Gateway, LeagueRepository, PickRepository, PlayerRepository,
    QueueRepository, RosterRepository, TeamRepository, TradeRepository,
};

/// Hard cap on the available-player list carried by a snapshot.
pub const AVAILABLE_PLAYERS_CAP: usize = 500;

/// Builds the full resync payload a joining (or resyncing) session needs.
/// Reads only; callers that need point-in-time consistency with writes run
/// the build inside the coordinator's serial queue.
pub struct SnapshotBuilder {
    gateway: Gateway,
}

impl SnapshotBuilder {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn state_sync(&self, league_id: Uuid) -> DomainResult<StateSyncPayload> {
        let league = self
            .gateway
            .leagues
            .get(league_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("League {} not found", league_id)))?;

        let state = self
            .gateway
            .draft_states
            .get(league_id)
            .await?
            .unwrap_or_else(|| DraftState::initial(league_id));

        self.state_sync_with(&league, &state).await
    }

    /// Build against an already-loaded state, so a coordinator holding its
    /// queue can snapshot exactly what it just wrote.
    pub async fn state_sync_with(
        &self,
        league: &LeagueSettings,
        state: &DraftState,
    ) -> DomainResult<StateSyncPayload> {
        let draft_order = self.gateway.teams.list(league.id).await?;
        let all_picks = self
            .gateway
            .picks
            .list_season(league.id, league.season)
            .await?;
        let completed_picks = all_picks
            .iter()
            .filter(|p| p.is_complete)
            .cloned()
            .collect();

        let available_players = self
            .gateway
            .players
            .list_available(league.id, AVAILABLE_PLAYERS_CAP)
            .await?;

        let team_rosters = Self::rosters_by_team(self.gateway.rosters.list(league.id).await?);

        let pending_trades = self
            .gateway
            .trades
            .list_pending(league.id)
            .await?
            .into_iter()
            .map(|(trade, assets)| PendingTradeView { trade, assets })
            .collect();

        let team_queues = self
            .gateway
            .queues
            .list(league.id)
            .await?
            .into_iter()
            .map(|q| (q.team_id, q.player_ids))
            .collect();

        let current_team = match state.current_team_id {
            Some(team_id) => self.gateway.teams.get(team_id).await?,
            None => None,
        };

        Ok(StateSyncPayload {
            league_id: league.id,
            status: state.effective_status(),
            current_round: state.current_round,
            current_pick: state.current_pick,
            current_team_id: state.current_team_id,
            current_team,
            is_paused: state.is_paused,
            pause_reason: state.pause_reason.clone(),
            timer_seconds_remaining: state.timer_seconds_remaining,
            draft_order,
            completed_picks,
            all_picks,
            available_players,
            team_rosters,
            pending_trades,
            total_rounds: league.total_rounds,
            draft_type: league.draft_type,
            roster_settings: league.roster.clone(),
            team_queues,
            timestamp: Utc::now(),
        })
    }

    fn rosters_by_team(entries: Vec<RosterEntry>) -> HashMap<Uuid, Vec<RosterEntry>> {
        let mut by_team: HashMap<Uuid, Vec<RosterEntry>> = HashMap::new();
        for entry in entries {
            by_team.entry(entry.team_id).or_default().push(entry);
        }
        by_team
    }
}
