use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Actor;
use crate::errors::{DomainError, DomainResult};
use crate::events::{EventSink, ServerEvent, StateSyncPayload};
use crate::models::{
    build_board, ActivityEntry, ActivityKind, DraftPick, DraftState, DraftStatus, LeagueSettings,
    Player, RosterEntry, TeamQueue,
};
use crate::repositories::{
    ActivityRepository, DraftStateRepository, Gateway, LeagueRepository, PickRepository,
    PlayerRepository, QueueRepository, RosterRepository, SelectionCommit, SelectionUndo,
    TeamRepository,
};
use crate::services::draft_clock::{ClockDriver, ClockObserver, ClockState, PickClock};
use crate::services::snapshot::SnapshotBuilder;
use crate::services::trade_engine::TradeEngine;

/// Pause reason applied when the clock expires with nobody left to draft.
pub const PAUSE_REASON_POOL_EMPTY: &str = "no available players";

/// Pause reason applied by the trade auto-pause policy.
pub const PAUSE_REASON_TRADE: &str = "Trade completed — draft paused for review";

/// Picks this close to the current pick trigger the trade auto-pause.
const TRADE_PAUSE_WINDOW: i32 = 3;

/// The per-league authority over draft state.
///
/// Every state-changing operation runs under `write_lock`, which tokio
/// queues fairly, giving the single-writer serial queue the protocol needs.
/// Timer expiries and trade acceptances re-enter the same lock, so a trade
/// accepted while the clock is running can never corrupt whose turn it is.
pub struct LeagueCoordinator {
    me: std::sync::Weak<LeagueCoordinator>,
    league_id: Uuid,
    gateway: Gateway,
    sink: Arc<dyn EventSink>,
    snapshots: SnapshotBuilder,
    trades: TradeEngine,
    write_lock: Mutex<()>,
    clock: Arc<PickClock>,
    driver: std::sync::Mutex<Option<ClockDriver>>,
    subscribers: AtomicUsize,
}

impl LeagueCoordinator {
    pub fn new(league_id: Uuid, gateway: Gateway, sink: Arc<dyn EventSink>) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            league_id,
            gateway: gateway.clone(),
            sink,
            snapshots: SnapshotBuilder::new(gateway.clone()),
            trades: TradeEngine::new(gateway),
            write_lock: Mutex::new(()),
            clock: Arc::new(PickClock::new(league_id)),
            driver: std::sync::Mutex::new(None),
            subscribers: AtomicUsize::new(0),
        })
    }

    pub fn league_id(&self) -> Uuid {
        self.league_id
    }

    pub fn add_subscriber(&self) -> usize {
        self.subscribers.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn remove_subscriber(&self) -> usize {
        let prev = self.subscribers.load(Ordering::SeqCst);
        if prev == 0 {
            return 0;
        }
        self.subscribers.fetch_sub(1, Ordering::SeqCst) - 1
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }

    pub async fn clock_is_live(&self) -> bool {
        self.clock.is_running().await
    }

    /// Abort the clock driver. Called by the registry on eviction; the
    /// next acquire re-instantiates everything from persisted state.
    pub fn shutdown(&self) {
        if let Ok(mut driver) = self.driver.lock() {
            *driver = None;
        }
    }

    // ---- read path ----

    /// Point-in-time snapshot, serialized with writes so a joiner's sync is
    /// strictly older than any event delivered afterwards.
    pub async fn snapshot(&self) -> DomainResult<StateSyncPayload> {
        let _guard = self.write_lock.lock().await;
        self.snapshots.state_sync(self.league_id).await
    }

    // ---- lifecycle ----

    pub async fn start_draft(&self, actor: &Actor) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;

        let league = self.league().await?;
        let mut state = self.state_or_initial().await?;

        let teams = self.gateway.teams.list(self.league_id).await?;
        if teams.is_empty() {
            return Err(DomainError::ValidationError(
                "Cannot start a draft with no teams".to_string(),
            ));
        }

        // Fix the board if the order was never explicitly set.
        let picks = self
            .gateway
            .picks
            .list_season(self.league_id, league.season)
            .await?;
        if picks.is_empty() {
            let team_ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();
            let board = build_board(
                self.league_id,
                league.season,
                league.draft_type,
                league.total_rounds,
                &team_ids,
            )?;
            self.gateway
                .picks
                .replace_board(self.league_id, league.season, &board)
                .await?;
        }

        let first_pick = self
            .gateway
            .picks
            .get_by_overall(self.league_id, league.season, 1)
            .await?
            .ok_or_else(|| {
                DomainError::ValidationError("First pick of the draft is missing".to_string())
            })?;

        state.start(&first_pick, league.timer_seconds)?;
        self.gateway.draft_states.upsert(&state).await?;

        self.append_activity(
            ActivityKind::DraftStarted,
            json!({ "startedBy": actor.user_id, "firstTeamId": first_pick.current_owner_team_id }),
        )
        .await?;

        info!(league_id = %self.league_id, "Draft started");

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::DraftStarted {
                    league_id: self.league_id,
                    timestamp: Utc::now(),
                },
            )
            .await;

        self.put_on_the_clock(&first_pick, league.timer_seconds).await?;
        Ok(())
    }

    pub async fn pause_draft(&self, actor: &Actor, reason: Option<String>) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;

        let mut state = self.state_required().await?;
        let residual = self.current_residual(&state).await;

        state.pause(reason, residual)?;
        state.clear_undo();
        self.gateway.draft_states.upsert(&state).await?;
        self.stop_clock().await;

        info!(league_id = %self.league_id, residual = residual, "Draft paused");

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::DraftPaused {
                    league_id: self.league_id,
                    pause_reason: state.pause_reason.clone(),
                    timer_seconds_remaining: state.timer_seconds_remaining,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn resume_draft(&self, actor: &Actor) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;

        let mut state = self.state_required().await?;
        state.resume()?;
        state.clear_undo();
        self.gateway.draft_states.upsert(&state).await?;

        let residual = state.timer_seconds_remaining.unwrap_or(0);
        self.arm_clock(residual, state.current_pick, state.current_team_id)
            .await;

        info!(league_id = %self.league_id, residual = residual, "Draft resumed");

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::DraftResumed {
                    league_id: self.league_id,
                    timer_seconds_remaining: state.timer_seconds_remaining,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn reset_draft(&self, actor: &Actor) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;

        let league = self.league().await?;
        self.stop_clock().await;

        let state = self
            .gateway
            .draft_states
            .reset_league(self.league_id, league.season)
            .await?;

        self.append_activity(
            ActivityKind::DraftReset,
            json!({ "resetBy": actor.user_id }),
        )
        .await?;

        warn!(league_id = %self.league_id, "Draft reset");

        let snapshot = self.snapshots.state_sync_with(&league, &state).await?;
        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::DraftReset {
                    league_id: self.league_id,
                    snapshot,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn set_draft_order(
        &self,
        actor: &Actor,
        ordered_team_ids: &[Uuid],
    ) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;

        let league = self.league().await?;
        let state = self.state_or_initial().await?;

        if state.status != DraftStatus::NotStarted && !state.is_paused {
            return Err(DomainError::InvalidState(
                "Draft order can only change before the draft or while paused".to_string(),
            ));
        }

        let teams = self.gateway.teams.list(self.league_id).await?;
        let existing: std::collections::HashSet<Uuid> = teams.iter().map(|t| t.id).collect();
        let proposed: std::collections::HashSet<Uuid> = ordered_team_ids.iter().copied().collect();
        if ordered_team_ids.len() != teams.len() || existing != proposed {
            return Err(DomainError::ValidationError(
                "Draft order must be a permutation of the league's teams".to_string(),
            ));
        }

        self.gateway
            .teams
            .update_draft_positions(self.league_id, ordered_team_ids)
            .await?;

        // Before the start the board is regenerated; mid-draft (paused) the
        // existing picks stand and only positions move.
        if state.status == DraftStatus::NotStarted {
            let board = build_board(
                self.league_id,
                league.season,
                league.draft_type,
                league.total_rounds,
                ordered_team_ids,
            )?;
            self.gateway
                .picks
                .replace_board(self.league_id, league.season, &board)
                .await?;
        }

        self.append_activity(
            ActivityKind::OrderUpdated,
            json!({ "updatedBy": actor.user_id, "order": ordered_team_ids }),
        )
        .await?;

        let draft_order = self.gateway.teams.list(self.league_id).await?;
        let all_picks = self
            .gateway
            .picks
            .list_season(self.league_id, league.season)
            .await?;

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::OrderUpdated {
                    league_id: self.league_id,
                    draft_order,
                    all_picks,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(())
    }

    // ---- picking ----

    pub async fn make_pick(
        &self,
        actor: &Actor,
        team_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.make_pick_locked(actor, Some(team_id), player_id, false)
            .await
    }

    /// Commissioner shortcut: pick for whichever team is on the clock.
    pub async fn force_pick(&self, actor: &Actor, player_id: Uuid) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;
        self.make_pick_locked(actor, None, player_id, false).await
    }

    pub async fn undo_last_pick(&self, actor: &Actor) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;

        let league = self.league().await?;
        let mut state = self.state_required().await?;

        if !state.undo_available {
            return Err(DomainError::InvalidState(
                "No pick is available to undo".to_string(),
            ));
        }
        let last_pick_id = state.last_pick_id.ok_or_else(|| {
            DomainError::InternalError("Undo window open without a recorded pick".to_string())
        })?;

        let pick = self
            .gateway
            .picks
            .get(last_pick_id)
            .await?
            .ok_or_else(|| {
                DomainError::InternalError("Recorded last pick no longer exists".to_string())
            })?;
        let player_id = pick.selected_player_id.ok_or_else(|| {
            DomainError::InternalError("Recorded last pick has no selection".to_string())
        })?;

        let mut cleared = pick.clone();
        cleared.clear_selection();
        state.reopen_pick(&cleared, league.timer_seconds)?;

        let team_id = cleared.current_owner_team_id;
        self.gateway
            .picks
            .undo_selection(&SelectionUndo {
                pick: cleared.clone(),
                team_id,
                player_id,
                state: state.clone(),
            })
            .await?;

        self.append_activity(
            ActivityKind::PickUndone,
            json!({
                "undoneBy": actor.user_id,
                "overallPick": cleared.overall_pick,
                "playerId": player_id,
            }),
        )
        .await?;

        info!(
            league_id = %self.league_id,
            overall_pick = cleared.overall_pick,
            "Pick undone"
        );

        let roster_updates = self.roster_update_for(team_id).await?;
        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::PickUndone {
                    league_id: self.league_id,
                    pick: cleared.clone(),
                    team_id,
                    player_id,
                    team_roster_updates: roster_updates,
                    timestamp: Utc::now(),
                },
            )
            .await;

        self.put_on_the_clock(&cleared, league.timer_seconds).await?;
        Ok(())
    }

    async fn make_pick_locked(
        &self,
        actor: &Actor,
        team_id: Option<Uuid>,
        player_id: Uuid,
        auto: bool,
    ) -> DomainResult<()> {
        let league = self.league().await?;
        let state = self.state_required().await?;

        if !state.is_live() {
            return Err(DomainError::InvalidState(format!(
                "Cannot pick while the draft is {}",
                state.effective_status()
            )));
        }

        let on_clock = state.current_team_id.ok_or_else(|| {
            DomainError::InternalError("Live draft has no team on the clock".to_string())
        })?;

        // Availability is checked before turn order so the loser of a
        // duplicate-pick race hears the player is gone, whoever is on the
        // clock by then.
        let player = self
            .gateway
            .players
            .get(player_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Player {} not found", player_id)))?;
        if !player.active {
            return Err(DomainError::PlayerUnavailable(format!(
                "{} is not an active player",
                player.name
            )));
        }
        if self
            .gateway
            .rosters
            .get_by_player(self.league_id, player_id)
            .await?
            .is_some()
        {
            return Err(DomainError::PlayerUnavailable(format!(
                "{} is already rostered in this league",
                player.name
            )));
        }

        if let Some(team_id) = team_id {
            if team_id != on_clock && !actor.is_commissioner {
                return Err(DomainError::NotYourTurn(format!(
                    "Team {} is on the clock",
                    on_clock
                )));
            }
        }

        let mut pick = self
            .gateway
            .picks
            .get_by_overall(self.league_id, league.season, state.current_pick)
            .await?
            .ok_or_else(|| {
                DomainError::InternalError(format!(
                    "Current pick {} has no board slot",
                    state.current_pick
                ))
            })?;
        pick.select(player_id)?;

        let roster_entry = RosterEntry::drafted(self.league_id, on_clock, player_id);

        let next_pick = self.next_open_pick(league.season, pick.id).await?;

        let mut new_state = state.clone();
        match &next_pick {
            Some(next) => new_state.advance_to(next, league.timer_seconds),
            None => new_state.complete(),
        }
        new_state.mark_selection(pick.id);

        self.gateway
            .picks
            .commit_selection(&SelectionCommit {
                pick: pick.clone(),
                roster_entry,
                state: new_state.clone(),
            })
            .await?;

        let kind = if auto {
            ActivityKind::AutoPick
        } else {
            ActivityKind::PickMade
        };
        self.append_activity(
            kind,
            json!({
                "overallPick": pick.overall_pick,
                "teamId": on_clock,
                "playerId": player_id,
            }),
        )
        .await?;

        info!(
            league_id = %self.league_id,
            overall_pick = pick.overall_pick,
            player = %player.name,
            auto = auto,
            "Pick committed"
        );

        let team_name = match self.gateway.teams.get(on_clock).await? {
            Some(team) => team.name,
            None => String::new(),
        };
        let roster_updates = self.roster_update_for(on_clock).await?;

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::PickMade {
                    league_id: self.league_id,
                    pick: pick.clone(),
                    player,
                    team_id: on_clock,
                    team_name,
                    pick_number: pick.overall_pick,
                    round: pick.round,
                    next_pick: next_pick.clone(),
                    team_roster_updates: roster_updates,
                    timestamp: Utc::now(),
                },
            )
            .await;

        match next_pick {
            Some(next) => {
                self.put_on_the_clock(&next, league.timer_seconds).await?;
            }
            None => {
                self.stop_clock().await;
                self.sink
                    .broadcast(
                        self.league_id,
                        ServerEvent::DraftComplete {
                            league_id: self.league_id,
                            completed_at: new_state.completed_at.unwrap_or_else(Utc::now),
                        },
                    )
                    .await;
            }
        }
        Ok(())
    }

    // ---- queues ----

    pub async fn update_queue(
        &self,
        actor: &Actor,
        team_id: Uuid,
        player_ids: Vec<Uuid>,
    ) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;

        if actor.team_id != Some(team_id) {
            return Err(DomainError::Unauthorized(
                "Only the team owner can edit its queue".to_string(),
            ));
        }

        let queue = match self.gateway.queues.get(self.league_id, team_id).await? {
            Some(mut queue) => {
                queue.replace(player_ids.clone());
                queue
            }
            None => TeamQueue::new(self.league_id, team_id, player_ids.clone()),
        };
        self.gateway.queues.upsert(&queue).await?;

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::QueueUpdated {
                    league_id: self.league_id,
                    team_id,
                    player_ids,
                },
            )
            .await;
        Ok(())
    }

    // ---- trades ----

    pub async fn propose_trade(
        &self,
        actor: &Actor,
        receiver_team_id: Uuid,
        assets: Vec<crate::models::ProposedAsset>,
    ) -> DomainResult<Uuid> {
        let _guard = self.write_lock.lock().await;

        let initiator_team_id = actor.team_id.ok_or_else(|| {
            DomainError::Unauthorized("Only a team owner can propose a trade".to_string())
        })?;

        if self
            .gateway
            .teams
            .get(receiver_team_id)
            .await?
            .filter(|t| t.league_id == self.league_id)
            .is_none()
        {
            return Err(DomainError::NotFound(format!(
                "Receiving team {} is not in this league",
                receiver_team_id
            )));
        }

        let (trade, trade_assets) = self
            .trades
            .propose(self.league_id, initiator_team_id, receiver_team_id, &assets)
            .await?;

        self.append_activity(
            ActivityKind::TradeProposed,
            json!({
                "tradeId": trade.id,
                "initiatorTeamId": initiator_team_id,
                "receiverTeamId": receiver_team_id,
            }),
        )
        .await?;

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::TradeProposed {
                    league_id: self.league_id,
                    trade: trade.clone(),
                    assets: trade_assets,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(trade.id)
    }

    pub async fn accept_trade(
        &self,
        actor: &Actor,
        trade_id: Uuid,
        forced: bool,
    ) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;

        if forced {
            self.require_commissioner(actor)?;
        }

        let league = self.league().await?;
        let (trade, _) = self.trades.load_pending(trade_id).await?;

        if !forced && !actor.is_commissioner && actor.team_id != Some(trade.receiver_team_id) {
            return Err(DomainError::Unauthorized(
                "Only the receiving team can accept this trade".to_string(),
            ));
        }

        let outcome = self
            .trades
            .accept(trade_id, league.season, forced)
            .await?;

        // The current pick may have just changed hands; the DB owner is
        // authoritative for whose turn it is. Trades are legal before the
        // draft starts, so a missing state row is just the initial one.
        let mut state = self.state_or_initial().await?;
        let mut reconciled = false;
        if state.status == DraftStatus::InProgress {
            let current = self
                .gateway
                .picks
                .get_by_overall(self.league_id, league.season, state.current_pick)
                .await?;
            if let Some(current) = current {
                if state.current_team_id != Some(current.current_owner_team_id) {
                    state.advance_to(&current, league.timer_seconds);
                    reconciled = true;
                }
            }
        }

        let pause = league.pause_on_trade
            && state.status == DraftStatus::InProgress
            && !state.is_paused
            && Self::trade_touches_clock(&state, &outcome.trade, &outcome.updated_picks, league.season);
        if pause {
            let residual = if reconciled {
                league.timer_seconds
            } else {
                self.current_residual(&state).await
            };
            state.pause(Some(PAUSE_REASON_TRADE.to_string()), residual)?;
        }

        state.clear_undo();
        self.gateway.draft_states.upsert(&state).await?;

        if pause || !state.is_live() {
            self.stop_clock().await;
        }

        self.append_activity(
            ActivityKind::TradeAccepted,
            json!({
                "tradeId": trade_id,
                "forced": forced,
                "acceptedBy": actor.user_id,
            }),
        )
        .await?;

        info!(
            league_id = %self.league_id,
            trade_id = %trade_id,
            paused = pause,
            "Trade accepted"
        );

        if pause {
            self.sink
                .broadcast(
                    self.league_id,
                    ServerEvent::DraftPaused {
                        league_id: self.league_id,
                        pause_reason: state.pause_reason.clone(),
                        timer_seconds_remaining: state.timer_seconds_remaining,
                        timestamp: Utc::now(),
                    },
                )
                .await;
        }

        let initiator_team = self
            .gateway
            .teams
            .get(outcome.trade.initiator_team_id)
            .await?
            .ok_or_else(|| DomainError::InternalError("Initiator team missing".to_string()))?;
        let receiver_team = self
            .gateway
            .teams
            .get(outcome.trade.receiver_team_id)
            .await?
            .ok_or_else(|| DomainError::InternalError("Receiver team missing".to_string()))?;

        let initiator_assets: Vec<_> = outcome
            .assets
            .iter()
            .filter(|a| a.from_team_id == outcome.trade.initiator_team_id)
            .cloned()
            .collect();
        let receiver_assets: Vec<_> = outcome
            .assets
            .iter()
            .filter(|a| a.from_team_id == outcome.trade.receiver_team_id)
            .cloned()
            .collect();

        let mut roster_updates = self
            .roster_update_for(outcome.trade.initiator_team_id)
            .await?;
        roster_updates.extend(
            self.roster_update_for(outcome.trade.receiver_team_id)
                .await?,
        );

        let updated_draft_order = if outcome.updated_picks.is_empty() {
            None
        } else {
            Some(
                self.gateway
                    .picks
                    .list_season(self.league_id, league.season)
                    .await?,
            )
        };

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::TradeAccepted {
                    league_id: self.league_id,
                    trade_id,
                    initiator_team,
                    receiver_team,
                    initiator_assets,
                    receiver_assets,
                    updated_draft_order,
                    team_roster_updates: roster_updates,
                    draft_paused: pause,
                    pause_reason: state.pause_reason.clone(),
                    timestamp: Utc::now(),
                },
            )
            .await;

        if reconciled && state.is_live() {
            if let Some(current) = self
                .gateway
                .picks
                .get_by_overall(self.league_id, league.season, state.current_pick)
                .await?
            {
                self.put_on_the_clock(&current, league.timer_seconds).await?;
            }
        }
        Ok(())
    }

    pub async fn reject_trade(&self, actor: &Actor, trade_id: Uuid) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;

        let (trade, _) = self.trades.load_pending(trade_id).await?;
        if !actor.is_commissioner && actor.team_id != Some(trade.receiver_team_id) {
            return Err(DomainError::Unauthorized(
                "Only the receiving team can reject this trade".to_string(),
            ));
        }

        self.trades.reject(trade_id).await?;
        self.append_activity(
            ActivityKind::TradeRejected,
            json!({ "tradeId": trade_id, "rejectedBy": actor.user_id }),
        )
        .await?;

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::TradeRejected {
                    league_id: self.league_id,
                    trade_id,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn cancel_trade(&self, actor: &Actor, trade_id: Uuid) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;

        let (trade, _) = self.trades.load_pending(trade_id).await?;
        if !actor.is_commissioner && actor.team_id != Some(trade.initiator_team_id) {
            return Err(DomainError::Unauthorized(
                "Only the proposing team can cancel this trade".to_string(),
            ));
        }

        self.trades.cancel(trade_id).await?;

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::TradeCancelled {
                    league_id: self.league_id,
                    trade_id,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(())
    }

    pub async fn veto_trade(
        &self,
        actor: &Actor,
        trade_id: Uuid,
        notes: Option<String>,
    ) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        self.require_commissioner(actor)?;

        self.trades.veto(trade_id, notes.clone()).await?;
        self.append_activity(
            ActivityKind::TradeVetoed,
            json!({ "tradeId": trade_id, "vetoedBy": actor.user_id }),
        )
        .await?;

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::TradeVetoed {
                    league_id: self.league_id,
                    trade_id,
                    commissioner_notes: notes,
                    timestamp: Utc::now(),
                },
            )
            .await;
        Ok(())
    }

    // ---- timer expiry ----

    async fn handle_timer_expired(&self, fired: ClockState) {
        let _guard = self.write_lock.lock().await;

        // An arm/halt since the expiry fired means this expiry is stale.
        if self.clock.generation().await != fired.generation {
            return;
        }

        let state = match self.state_required().await {
            Ok(state) => state,
            Err(e) => {
                warn!(league_id = %self.league_id, error = %e, "Expiry with no draft state");
                return;
            }
        };
        if !state.is_live() {
            return;
        }

        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::TimerExpired {
                    league_id: self.league_id,
                    pick_number: state.current_pick,
                    team_id: state.current_team_id,
                    timestamp: Utc::now(),
                },
            )
            .await;

        if let Err(e) = self
            .append_activity(
                ActivityKind::TimerExpired,
                json!({ "overallPick": state.current_pick, "teamId": state.current_team_id }),
            )
            .await
        {
            warn!(league_id = %self.league_id, error = %e, "Failed to journal expiry");
        }

        match self.auto_pick(&state).await {
            Ok(()) => {}
            Err(e) => {
                warn!(league_id = %self.league_id, error = %e, "Auto-pick failed");
            }
        }
    }

    async fn auto_pick(&self, state: &DraftState) -> DomainResult<()> {
        let best = self.best_available().await?;

        let Some(best) = best else {
            // Nobody left to draft: park the draft instead of crashing the
            // timer loop.
            let mut state = state.clone();
            state.pause(Some(PAUSE_REASON_POOL_EMPTY.to_string()), 0)?;
            state.clear_undo();
            self.gateway.draft_states.upsert(&state).await?;
            self.stop_clock().await;

            self.sink
                .broadcast(
                    self.league_id,
                    ServerEvent::StaleWarning {
                        league_id: self.league_id,
                        message: "Auto-pick found no available players".to_string(),
                        timestamp: Utc::now(),
                    },
                )
                .await;
            self.sink
                .broadcast(
                    self.league_id,
                    ServerEvent::DraftPaused {
                        league_id: self.league_id,
                        pause_reason: state.pause_reason.clone(),
                        timer_seconds_remaining: state.timer_seconds_remaining,
                        timestamp: Utc::now(),
                    },
                )
                .await;
            return Ok(());
        };

        let actor = Actor::system();
        self.make_pick_locked(&actor, None, best.id, true).await
    }

    async fn best_available(&self) -> DomainResult<Option<Player>> {
        let mut players = self.gateway.players.list_available(self.league_id, 1).await?;
        Ok(if players.is_empty() {
            None
        } else {
            Some(players.remove(0))
        })
    }

    // ---- helpers ----

    fn require_commissioner(&self, actor: &Actor) -> DomainResult<()> {
        if actor.is_commissioner {
            Ok(())
        } else {
            Err(DomainError::Unauthorized(
                "Commissioner privileges required".to_string(),
            ))
        }
    }

    async fn league(&self) -> DomainResult<LeagueSettings> {
        self.gateway
            .leagues
            .get(self.league_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("League {} not found", self.league_id)))
    }

    async fn state_or_initial(&self) -> DomainResult<DraftState> {
        Ok(self
            .gateway
            .draft_states
            .get(self.league_id)
            .await?
            .unwrap_or_else(|| DraftState::initial(self.league_id)))
    }

    async fn state_required(&self) -> DomainResult<DraftState> {
        self.gateway
            .draft_states
            .get(self.league_id)
            .await?
            .ok_or_else(|| {
                DomainError::InvalidState("The draft has not been started".to_string())
            })
    }

    /// Lowest-numbered incomplete pick of the season, skipping the pick
    /// being committed in the same transaction.
    async fn next_open_pick(
        &self,
        season: i32,
        committing_pick_id: Uuid,
    ) -> DomainResult<Option<DraftPick>> {
        let picks = self.gateway.picks.list_season(self.league_id, season).await?;
        Ok(picks
            .into_iter()
            .find(|p| !p.is_complete && p.id != committing_pick_id))
    }

    async fn roster_update_for(
        &self,
        team_id: Uuid,
    ) -> DomainResult<std::collections::HashMap<Uuid, Vec<RosterEntry>>> {
        let mut updates = std::collections::HashMap::new();
        updates.insert(
            team_id,
            self.gateway.rosters.list_by_team(self.league_id, team_id).await?,
        );
        Ok(updates)
    }

    async fn current_residual(&self, state: &DraftState) -> i32 {
        if self.clock.is_running().await {
            return self.clock.seconds_remaining().await;
        }
        match (state.timer_seconds_remaining, state.timer_started_at) {
            (Some(remaining), Some(started)) => {
                let elapsed = (Utc::now() - started).num_seconds().max(0) as i32;
                (remaining - elapsed).max(0)
            }
            (Some(remaining), None) => remaining.max(0),
            _ => 0,
        }
    }

    async fn put_on_the_clock(
        &self,
        pick: &DraftPick,
        timer_seconds: i32,
    ) -> DomainResult<()> {
        self.arm_clock(
            timer_seconds,
            pick.overall_pick,
            Some(pick.current_owner_team_id),
        )
        .await;

        let team = self.gateway.teams.get(pick.current_owner_team_id).await?;
        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::OnTheClock {
                    league_id: self.league_id,
                    team_id: pick.current_owner_team_id,
                    team,
                    pick_number: pick.overall_pick,
                    round: pick.round,
                    timer_duration: timer_seconds,
                    timer_started_at: Some(Utc::now()),
                },
            )
            .await;
        Ok(())
    }

    async fn arm_clock(&self, seconds: i32, pick_number: i32, team_id: Option<Uuid>) {
        self.clock.arm(seconds, pick_number, team_id).await;
        let Some(me) = self.me.upgrade() else { return };
        let observer: Arc<dyn ClockObserver> = me;
        let driver = ClockDriver::spawn(self.clock.clone(), observer);
        if let Ok(mut slot) = self.driver.lock() {
            *slot = Some(driver);
        }
    }

    async fn stop_clock(&self) {
        self.clock.halt().await;
        if let Ok(mut slot) = self.driver.lock() {
            *slot = None;
        }
    }

    async fn append_activity(
        &self,
        kind: ActivityKind,
        data: serde_json::Value,
    ) -> DomainResult<()> {
        self.gateway
            .activity
            .append(&ActivityEntry::new(self.league_id, kind, data))
            .await
    }

    fn trade_touches_clock(
        state: &DraftState,
        trade: &crate::models::Trade,
        updated_picks: &[DraftPick],
        season: i32,
    ) -> bool {
        let party_on_clock = state
            .current_team_id
            .map(|t| t == trade.initiator_team_id || t == trade.receiver_team_id)
            .unwrap_or(false);

        let window = state.current_pick..=state.current_pick + TRADE_PAUSE_WINDOW;
        let near_pick = updated_picks
            .iter()
            .any(|p| p.season == season && window.contains(&p.overall_pick));

        party_on_clock || near_pick
    }
}

#[async_trait]
impl ClockObserver for LeagueCoordinator {
    async fn on_tick(&self, state: ClockState, persist: bool) {
        self.sink
            .broadcast(
                self.league_id,
                ServerEvent::TimerTick {
                    league_id: self.league_id,
                    seconds_remaining: state.seconds_remaining,
                    current_pick: state.pick_number,
                    current_team_id: state.team_id,
                },
            )
            .await;

        if persist {
            let _guard = self.write_lock.lock().await;
            if let Ok(Some(mut draft_state)) = self.gateway.draft_states.get(self.league_id).await
            {
                if draft_state.is_live() {
                    draft_state.timer_seconds_remaining = Some(state.seconds_remaining);
                    draft_state.timer_started_at = Some(Utc::now());
                    if let Err(e) = self.gateway.draft_states.upsert(&draft_state).await {
                        warn!(
                            league_id = %self.league_id,
                            error = %e,
                            "Failed to persist timer state"
                        );
                    }
                }
            }
        }
    }

    async fn on_expired(&self, state: ClockState) {
        self.handle_timer_expired(state).await;
    }
}
