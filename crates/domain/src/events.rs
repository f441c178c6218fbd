use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::{
    DraftPick, DraftStatus, DraftType, Player, RosterEntry, RosterSettings, Team, Trade,
    TradeAsset,
};

/// Full resync payload delivered to a joining session and carried by
/// `DraftReset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSyncPayload {
    pub league_id: Uuid,
    pub status: DraftStatus,
    pub current_round: i32,
    pub current_pick: i32,
    pub current_team_id: Option<Uuid>,
    pub current_team: Option<Team>,
    pub is_paused: bool,
    pub pause_reason: Option<String>,
    pub timer_seconds_remaining: Option<i32>,
    pub draft_order: Vec<Team>,
    pub completed_picks: Vec<DraftPick>,
    pub all_picks: Vec<DraftPick>,
    pub available_players: Vec<Player>,
    pub team_rosters: HashMap<Uuid, Vec<RosterEntry>>,
    pub pending_trades: Vec<PendingTradeView>,
    pub total_rounds: i32,
    pub draft_type: DraftType,
    pub roster_settings: RosterSettings,
    pub team_queues: HashMap<Uuid, Vec<Uuid>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTradeView {
    pub trade: Trade,
    pub assets: Vec<TradeAsset>,
}

/// Authoritative events fanned out to draft-room subscribers. The wire
/// discriminant is the `event` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    StateSync(StateSyncPayload),
    DraftStarted {
        league_id: Uuid,
        timestamp: DateTime<Utc>,
    },
    OnTheClock {
        league_id: Uuid,
        team_id: Uuid,
        team: Option<Team>,
        pick_number: i32,
        round: i32,
        timer_duration: i32,
        timer_started_at: Option<DateTime<Utc>>,
    },
    DraftPaused {
        league_id: Uuid,
        pause_reason: Option<String>,
        timer_seconds_remaining: Option<i32>,
        timestamp: DateTime<Utc>,
    },
    DraftResumed {
        league_id: Uuid,
        timer_seconds_remaining: Option<i32>,
        timestamp: DateTime<Utc>,
    },
    TimerTick {
        league_id: Uuid,
        seconds_remaining: i32,
        current_pick: i32,
        current_team_id: Option<Uuid>,
    },
    TimerExpired {
        league_id: Uuid,
        pick_number: i32,
        team_id: Option<Uuid>,
        timestamp: DateTime<Utc>,
    },
    StaleWarning {
        league_id: Uuid,
        message: String,
        timestamp: DateTime<Utc>,
    },
    PickMade {
        league_id: Uuid,
        pick: DraftPick,
        player: Player,
        team_id: Uuid,
        team_name: String,
        pick_number: i32,
        round: i32,
        next_pick: Option<DraftPick>,
        team_roster_updates: HashMap<Uuid, Vec<RosterEntry>>,
        timestamp: DateTime<Utc>,
    },
    PickUndone {
        league_id: Uuid,
        pick: DraftPick,
        team_id: Uuid,
        player_id: Uuid,
        team_roster_updates: HashMap<Uuid, Vec<RosterEntry>>,
        timestamp: DateTime<Utc>,
    },
    DraftComplete {
        league_id: Uuid,
        completed_at: DateTime<Utc>,
    },
    DraftReset {
        league_id: Uuid,
        snapshot: StateSyncPayload,
        timestamp: DateTime<Utc>,
    },
    OrderUpdated {
        league_id: Uuid,
        draft_order: Vec<Team>,
        all_picks: Vec<DraftPick>,
        timestamp: DateTime<Utc>,
    },
    TradeProposed {
        league_id: Uuid,
        trade: Trade,
        assets: Vec<TradeAsset>,
        timestamp: DateTime<Utc>,
    },
    TradeAccepted {
        league_id: Uuid,
        trade_id: Uuid,
        initiator_team: Team,
        receiver_team: Team,
        initiator_assets: Vec<TradeAsset>,
        receiver_assets: Vec<TradeAsset>,
        updated_draft_order: Option<Vec<DraftPick>>,
        team_roster_updates: HashMap<Uuid, Vec<RosterEntry>>,
        draft_paused: bool,
        pause_reason: Option<String>,
        timestamp: DateTime<Utc>,
    },
    TradeRejected {
        league_id: Uuid,
        trade_id: Uuid,
        timestamp: DateTime<Utc>,
    },
    TradeCancelled {
        league_id: Uuid,
        trade_id: Uuid,
        timestamp: DateTime<Utc>,
    },
    TradeVetoed {
        league_id: Uuid,
        trade_id: Uuid,
        commissioner_notes: Option<String>,
        timestamp: DateTime<Utc>,
    },
    QueueUpdated {
        league_id: Uuid,
        team_id: Uuid,
        player_ids: Vec<Uuid>,
    },
    Error {
        league_id: Option<Uuid>,
        code: String,
        message: String,
        details: Option<JsonValue>,
    },
    Pong,
}

impl ServerEvent {
    pub fn error(league_id: Option<Uuid>, code: &str, message: String) -> Self {
        ServerEvent::Error {
            league_id,
            code: code.to_string(),
            message,
            details: None,
        }
    }
}

/// Delivery seam between the coordinator and the transport. Broadcasts go
/// to every session in a league room; unicasts answer exactly one session.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn broadcast(&self, league_id: Uuid, event: ServerEvent);

    async fn unicast(&self, session_id: Uuid, event: ServerEvent);
}

/// Sink that drops everything. Used when a coordinator runs without any
/// attached room (recovery passes, offline tooling).
#[derive(Debug, Default, Clone)]
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn broadcast(&self, _league_id: Uuid, _event: ServerEvent) {}

    async fn unicast(&self, _session_id: Uuid, _event: ServerEvent) {}
}
