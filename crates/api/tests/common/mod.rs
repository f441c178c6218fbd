//! Shared fixture: a seeded in-memory league with connected sessions.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use uuid::Uuid;

use api::AppState;
use db::MemoryStore;
use domain::auth::SessionIdentity;
use domain::repositories::{DraftStateRepository, RosterRepository};
use domain::models::{DraftType, LeagueSettings, Player, Position, RosterSettings, Team};
use websocket::DraftSession;

pub struct TestLeague {
    pub store: MemoryStore,
    pub state: AppState,
    pub league_id: Uuid,
    pub commissioner_user: Uuid,
    pub teams: Vec<Team>,
    pub owners: Vec<Uuid>,
    pub players: Vec<Player>,
}

pub struct LeagueSpec {
    pub team_count: usize,
    pub draft_type: DraftType,
    pub total_rounds: i32,
    pub timer_seconds: i32,
    pub pause_on_trade: bool,
    pub player_count: usize,
}

impl Default for LeagueSpec {
    fn default() -> Self {
        Self {
            team_count: 2,
            draft_type: DraftType::Linear,
            total_rounds: 2,
            timer_seconds: 90,
            pause_on_trade: true,
            player_count: 8,
        }
    }
}

pub fn build_league(spec: LeagueSpec) -> TestLeague {
    let store = MemoryStore::new();
    let league_id = Uuid::new_v4();
    let commissioner_user = Uuid::new_v4();

    let mut starters = BTreeMap::new();
    starters.insert("QB".to_string(), 1);
    starters.insert("RB".to_string(), 2);

    store.insert_league(LeagueSettings {
        id: league_id,
        name: "Test League".to_string(),
        season: 2026,
        max_teams: spec.team_count as i32,
        commissioner_user_id: commissioner_user,
        roster: RosterSettings { starters, bench: 4 },
        draft_type: spec.draft_type,
        total_rounds: spec.total_rounds,
        timer_seconds: spec.timer_seconds,
        reserve_seconds: 0,
        pause_on_trade: spec.pause_on_trade,
        max_keepers: 2,
        scheduled_start: None,
        keeper_deadline: None,
    });

    let mut teams = Vec::new();
    let mut owners = Vec::new();
    for i in 0..spec.team_count {
        let owner = Uuid::new_v4();
        let name = format!("Team {}", (b'A' + i as u8) as char);
        let team = Team::new(league_id, name, i as i32 + 1)
            .unwrap()
            .with_owner(owner);
        store.insert_team(team.clone());
        teams.push(team);
        owners.push(owner);
    }

    // Ranked p1..pN: rank i is the i-th best player.
    let mut players = Vec::new();
    for i in 0..spec.player_count {
        let position = match i % 4 {
            0 => Position::RB,
            1 => Position::WR,
            2 => Position::QB,
            _ => Position::TE,
        };
        let player = Player::new(format!("p{}", i + 1), position).with_rank(i as i32 + 1);
        store.insert_player(player.clone());
        players.push(player);
    }

    let state = AppState::in_memory(&store, None);

    TestLeague {
        store,
        state,
        league_id,
        commissioner_user,
        teams,
        owners,
        players,
    }
}

pub struct Connected {
    pub session: DraftSession,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl Connected {
    /// Drain everything received so far, parsed.
    pub fn drain(&mut self) -> Vec<serde_json::Value> {
        let mut events = Vec::new();
        while let Ok(json) = self.rx.try_recv() {
            events.push(serde_json::from_str(&json).expect("server sent valid JSON"));
        }
        events
    }

    /// Event names of everything received so far, in order.
    pub fn drain_event_names(&mut self) -> Vec<String> {
        self.drain()
            .into_iter()
            .map(|e| e["event"].as_str().expect("event tag").to_string())
            .collect()
    }

    /// Like [`Connected::drain`], minus clock ticks (their cadence depends
    /// on wall time, not on the operations under test).
    pub fn drain_without_ticks(&mut self) -> Vec<serde_json::Value> {
        self.drain()
            .into_iter()
            .filter(|e| e["event"] != "TimerTick")
            .collect()
    }
}

/// Join the league's draft room as the given user.
pub async fn connect(fixture: &TestLeague, user_id: Uuid) -> Connected {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = fixture
        .state
        .hub
        .join(
            Uuid::new_v4(),
            SessionIdentity {
                user_id,
                is_admin: false,
            },
            fixture.league_id,
            None,
            tx,
        )
        .await
        .expect("join should succeed");

    Connected { session, rx }
}

/// Current draft state straight from the store.
pub async fn draft_state(fixture: &TestLeague) -> domain::models::DraftState {
    fixture
        .state
        .gateway
        .draft_states
        .get(fixture.league_id)
        .await
        .unwrap()
        .expect("draft state exists")
}

pub async fn roster_player_ids(fixture: &TestLeague, team_id: Uuid) -> Vec<Uuid> {
    fixture
        .state
        .gateway
        .rosters
        .list_by_team(fixture.league_id, team_id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.player_id)
        .collect()
}
