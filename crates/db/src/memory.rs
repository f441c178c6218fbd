//! Fully in-memory persistence gateway.
//!
//! Every composite operation takes the single state lock once, so the
//! atomicity the SQL gateway gets from transactions and row locks holds
//! here too. Used by the scenario tests and the no-database demo mode.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use domain::errors::{DomainError, DomainResult};
use domain::models::{
    ActivityEntry, AssetRef, DraftPick, DraftState, LeagueSettings, Player, RosterEntry, Team,
    TeamQueue, Trade, TradeAsset, TradeStatus,
};
use domain::repositories::{
    ActivityRepository, DraftStateRepository, Gateway, LeagueRepository, PickRepository,
    PlayerRepository, QueueRepository, RosterRepository, SelectionCommit, SelectionUndo,
    TeamRepository, TradeRepository, TradeSwapOutcome,
};

#[derive(Debug, Default)]
struct MemoryState {
    leagues: HashMap<Uuid, LeagueSettings>,
    teams: HashMap<Uuid, Team>,
    players: HashMap<Uuid, Player>,
    picks: HashMap<Uuid, DraftPick>,
    rosters: Vec<RosterEntry>,
    states: HashMap<Uuid, DraftState>,
    trades: HashMap<Uuid, (Trade, Vec<TradeAsset>)>,
    queues: HashMap<(Uuid, Uuid), TeamQueue>,
    activity: Vec<ActivityEntry>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle this store into a gateway (each repository slot is a clone
    /// sharing the same state).
    pub fn gateway(&self) -> Gateway {
        Gateway {
            leagues: Arc::new(self.clone()),
            draft_states: Arc::new(self.clone()),
            teams: Arc::new(self.clone()),
            players: Arc::new(self.clone()),
            picks: Arc::new(self.clone()),
            rosters: Arc::new(self.clone()),
            trades: Arc::new(self.clone()),
            queues: Arc::new(self.clone()),
            activity: Arc::new(self.clone()),
        }
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| DomainError::StorageError("Memory store poisoned".to_string()))
    }

    // ---- seeding helpers ----

    pub fn insert_league(&self, league: LeagueSettings) {
        if let Ok(mut state) = self.state.lock() {
            state.leagues.insert(league.id, league);
        }
    }

    pub fn insert_team(&self, team: Team) {
        if let Ok(mut state) = self.state.lock() {
            state.teams.insert(team.id, team);
        }
    }

    pub fn insert_player(&self, player: Player) {
        if let Ok(mut state) = self.state.lock() {
            state.players.insert(player.id, player);
        }
    }

    /// Keeper declaration: rosters the player before the draft so the pool
    /// excludes them.
    pub fn declare_keeper(&self, league_id: Uuid, team_id: Uuid, player_id: Uuid, round: i32) {
        if let Ok(mut state) = self.state.lock() {
            state
                .rosters
                .push(RosterEntry::keeper(league_id, team_id, player_id, round));
        }
    }
}

#[async_trait]
impl LeagueRepository for MemoryStore {
    async fn get(&self, league_id: Uuid) -> DomainResult<Option<LeagueSettings>> {
        Ok(self.lock()?.leagues.get(&league_id).cloned())
    }
}

#[async_trait]
impl DraftStateRepository for MemoryStore {
    async fn get(&self, league_id: Uuid) -> DomainResult<Option<DraftState>> {
        Ok(self.lock()?.states.get(&league_id).cloned())
    }

    async fn upsert(&self, state: &DraftState) -> DomainResult<()> {
        self.lock()?.states.insert(state.league_id, state.clone());
        Ok(())
    }

    async fn reset_league(&self, league_id: Uuid, season: i32) -> DomainResult<DraftState> {
        let mut state = self.lock()?;

        state
            .picks
            .retain(|_, p| !(p.league_id == league_id && p.season > season));
        for pick in state.picks.values_mut() {
            if pick.league_id == league_id && pick.season == season {
                pick.current_owner_team_id = pick.original_owner_team_id;
                pick.clear_selection();
            }
        }

        state
            .rosters
            .retain(|r| !(r.league_id == league_id && !r.is_keeper));

        for (trade, _) in state.trades.values_mut() {
            if trade.league_id == league_id && trade.status == TradeStatus::Pending {
                trade.cancel()?;
            }
        }

        let fresh = DraftState::initial(league_id);
        state.states.insert(league_id, fresh.clone());
        Ok(fresh)
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn get(&self, team_id: Uuid) -> DomainResult<Option<Team>> {
        Ok(self.lock()?.teams.get(&team_id).cloned())
    }

    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<Team>> {
        let mut teams: Vec<Team> = self
            .lock()?
            .teams
            .values()
            .filter(|t| t.league_id == league_id)
            .cloned()
            .collect();
        teams.sort_by_key(|t| t.draft_position);
        Ok(teams)
    }

    async fn update_draft_positions(
        &self,
        league_id: Uuid,
        ordered_team_ids: &[Uuid],
    ) -> DomainResult<()> {
        let mut state = self.lock()?;
        for (index, team_id) in ordered_team_ids.iter().enumerate() {
            if let Some(team) = state.teams.get_mut(team_id) {
                if team.league_id == league_id {
                    team.draft_position = index as i32 + 1;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn get(&self, player_id: Uuid) -> DomainResult<Option<Player>> {
        Ok(self.lock()?.players.get(&player_id).cloned())
    }

    async fn list_available(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<Player>> {
        let state = self.lock()?;
        let rostered: std::collections::HashSet<Uuid> = state
            .rosters
            .iter()
            .filter(|r| r.league_id == league_id)
            .map(|r| r.player_id)
            .collect();

        let mut available: Vec<Player> = state
            .players
            .values()
            .filter(|p| p.active && !rostered.contains(&p.id))
            .cloned()
            .collect();
        available.sort_by_key(|p| p.draft_order_key());
        available.truncate(limit);
        Ok(available)
    }
}

#[async_trait]
impl PickRepository for MemoryStore {
    async fn get(&self, pick_id: Uuid) -> DomainResult<Option<DraftPick>> {
        Ok(self.lock()?.picks.get(&pick_id).cloned())
    }

    async fn get_by_overall(
        &self,
        league_id: Uuid,
        season: i32,
        overall_pick: i32,
    ) -> DomainResult<Option<DraftPick>> {
        Ok(self
            .lock()?
            .picks
            .values()
            .find(|p| {
                p.league_id == league_id && p.season == season && p.overall_pick == overall_pick
            })
            .cloned())
    }

    async fn list_season(&self, league_id: Uuid, season: i32) -> DomainResult<Vec<DraftPick>> {
        let mut picks: Vec<DraftPick> = self
            .lock()?
            .picks
            .values()
            .filter(|p| p.league_id == league_id && p.season == season)
            .cloned()
            .collect();
        picks.sort_by_key(|p| p.overall_pick);
        Ok(picks)
    }

    async fn find_future(
        &self,
        league_id: Uuid,
        season: i32,
        round: i32,
        original_owner_team_id: Uuid,
    ) -> DomainResult<Option<DraftPick>> {
        Ok(self
            .lock()?
            .picks
            .values()
            .find(|p| {
                p.league_id == league_id
                    && p.season == season
                    && p.round == round
                    && p.original_owner_team_id == original_owner_team_id
            })
            .cloned())
    }

    async fn replace_board(
        &self,
        league_id: Uuid,
        season: i32,
        picks: &[DraftPick],
    ) -> DomainResult<()> {
        let mut state = self.lock()?;
        state
            .picks
            .retain(|_, p| !(p.league_id == league_id && p.season == season));
        for pick in picks {
            state.picks.insert(pick.id, pick.clone());
        }
        Ok(())
    }

    async fn commit_selection(&self, commit: &SelectionCommit) -> DomainResult<()> {
        let mut state = self.lock()?;

        let current = state.picks.get(&commit.pick.id).ok_or_else(|| {
            DomainError::NotFound(format!("Pick {} does not exist", commit.pick.id))
        })?;
        if current.is_complete {
            return Err(DomainError::Conflict(format!(
                "Pick {} is already complete",
                current.overall_pick
            )));
        }
        if state.rosters.iter().any(|r| {
            r.league_id == commit.roster_entry.league_id
                && r.player_id == commit.roster_entry.player_id
        }) {
            return Err(DomainError::Conflict(format!(
                "Player {} is already rostered",
                commit.roster_entry.player_id
            )));
        }

        state.picks.insert(commit.pick.id, commit.pick.clone());
        state.rosters.push(commit.roster_entry.clone());
        state
            .states
            .insert(commit.state.league_id, commit.state.clone());
        Ok(())
    }

    async fn undo_selection(&self, undo: &SelectionUndo) -> DomainResult<()> {
        let mut state = self.lock()?;

        state.picks.insert(undo.pick.id, undo.pick.clone());
        state.rosters.retain(|r| {
            !(r.league_id == undo.pick.league_id
                && r.team_id == undo.team_id
                && r.player_id == undo.player_id)
        });
        state.states.insert(undo.state.league_id, undo.state.clone());
        Ok(())
    }
}

#[async_trait]
impl RosterRepository for MemoryStore {
    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<RosterEntry>> {
        Ok(self
            .lock()?
            .rosters
            .iter()
            .filter(|r| r.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn list_by_team(
        &self,
        league_id: Uuid,
        team_id: Uuid,
    ) -> DomainResult<Vec<RosterEntry>> {
        Ok(self
            .lock()?
            .rosters
            .iter()
            .filter(|r| r.league_id == league_id && r.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn get_by_player(
        &self,
        league_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<Option<RosterEntry>> {
        Ok(self
            .lock()?
            .rosters
            .iter()
            .find(|r| r.league_id == league_id && r.player_id == player_id)
            .cloned())
    }

    async fn create(&self, entry: &RosterEntry) -> DomainResult<RosterEntry> {
        let mut state = self.lock()?;
        if state
            .rosters
            .iter()
            .any(|r| r.league_id == entry.league_id && r.player_id == entry.player_id)
        {
            return Err(DomainError::Conflict(format!(
                "Player {} is already rostered in league {}",
                entry.player_id, entry.league_id
            )));
        }
        state.rosters.push(entry.clone());
        Ok(entry.clone())
    }
}

#[async_trait]
impl TradeRepository for MemoryStore {
    async fn create(&self, trade: &Trade, assets: &[TradeAsset]) -> DomainResult<()> {
        self.lock()?
            .trades
            .insert(trade.id, (trade.clone(), assets.to_vec()));
        Ok(())
    }

    async fn get_with_assets(
        &self,
        trade_id: Uuid,
    ) -> DomainResult<Option<(Trade, Vec<TradeAsset>)>> {
        Ok(self.lock()?.trades.get(&trade_id).cloned())
    }

    async fn list_pending(
        &self,
        league_id: Uuid,
    ) -> DomainResult<Vec<(Trade, Vec<TradeAsset>)>> {
        let mut pending: Vec<(Trade, Vec<TradeAsset>)> = self
            .lock()?
            .trades
            .values()
            .filter(|(t, _)| t.league_id == league_id && t.status == TradeStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|(t, _)| t.proposed_at);
        Ok(pending)
    }

    async fn update(&self, trade: &Trade) -> DomainResult<()> {
        let mut state = self.lock()?;
        if let Some((existing, _)) = state.trades.get_mut(&trade.id) {
            *existing = trade.clone();
        }
        Ok(())
    }

    async fn execute_swap(
        &self,
        trade_id: Uuid,
        current_season: i32,
        forced_by_commissioner: bool,
    ) -> DomainResult<TradeSwapOutcome> {
        let mut state = self.lock()?;

        let (mut trade, assets) = state
            .trades
            .get(&trade_id)
            .cloned()
            .ok_or_else(|| DomainError::TradeNotFound(format!("Trade {} not found", trade_id)))?;

        if trade.status != TradeStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "Trade {} is no longer pending",
                trade_id
            )));
        }

        // Validate every asset before touching anything, so a stale asset
        // leaves the store unchanged (the rollback the SQL gateway gets for
        // free).
        for asset in &assets {
            match &asset.asset {
                AssetRef::DraftPick { pick_id } => {
                    let pick = state.picks.get(pick_id).ok_or_else(|| {
                        DomainError::Conflict(format!("Traded pick {} no longer exists", pick_id))
                    })?;
                    if pick.is_complete || pick.current_owner_team_id != asset.from_team_id {
                        return Err(DomainError::Conflict(format!(
                            "Pick {} is no longer tradeable by its stated owner",
                            pick.overall_pick
                        )));
                    }
                }
                AssetRef::Player { player_id } => {
                    let entry = state
                        .rosters
                        .iter()
                        .find(|r| r.league_id == trade.league_id && r.player_id == *player_id)
                        .ok_or_else(|| {
                            DomainError::Conflict(format!(
                                "Player {} is no longer rostered",
                                player_id
                            ))
                        })?;
                    if entry.team_id != asset.from_team_id {
                        return Err(DomainError::Conflict(format!(
                            "Player {} is no longer on the giving team",
                            player_id
                        )));
                    }
                }
                AssetRef::FuturePick { season, round } => {
                    if *season <= current_season {
                        return Err(DomainError::Conflict(format!(
                            "Future pick season {} is not in the future",
                            season
                        )));
                    }
                    if let Some(pick) = state.picks.values().find(|p| {
                        p.league_id == trade.league_id
                            && p.season == *season
                            && p.round == *round
                            && p.original_owner_team_id == asset.from_team_id
                    }) {
                        if pick.is_complete || pick.current_owner_team_id != asset.from_team_id {
                            return Err(DomainError::Conflict(format!(
                                "Future pick {} round {} is no longer tradeable",
                                season, round
                            )));
                        }
                    }
                }
            }
        }

        let mut updated_picks = Vec::new();
        let mut moved_entries = Vec::new();

        for asset in &assets {
            let to_team = if asset.from_team_id == trade.initiator_team_id {
                trade.receiver_team_id
            } else {
                trade.initiator_team_id
            };

            match &asset.asset {
                AssetRef::DraftPick { pick_id } => {
                    if let Some(pick) = state.picks.get_mut(pick_id) {
                        pick.current_owner_team_id = to_team;
                        updated_picks.push(pick.clone());
                    }
                }
                AssetRef::Player { player_id } => {
                    let league_id = trade.league_id;
                    if let Some(entry) = state
                        .rosters
                        .iter_mut()
                        .find(|r| r.league_id == league_id && r.player_id == *player_id)
                    {
                        *entry = entry.traded_to(to_team);
                        moved_entries.push(entry.clone());
                    }
                }
                AssetRef::FuturePick { season, round } => {
                    let league_id = trade.league_id;
                    let existing_id = state
                        .picks
                        .values()
                        .find(|p| {
                            p.league_id == league_id
                                && p.season == *season
                                && p.round == *round
                                && p.original_owner_team_id == asset.from_team_id
                        })
                        .map(|p| p.id);

                    match existing_id {
                        Some(id) => {
                            if let Some(pick) = state.picks.get_mut(&id) {
                                pick.current_owner_team_id = to_team;
                                updated_picks.push(pick.clone());
                            }
                        }
                        None => {
                            let pick = DraftPick::future(
                                league_id,
                                *season,
                                *round,
                                asset.from_team_id,
                                to_team,
                            )?;
                            state.picks.insert(pick.id, pick.clone());
                            updated_picks.push(pick);
                        }
                    }
                }
            }
        }

        trade.begin_processing()?;
        trade.complete(forced_by_commissioner)?;
        state
            .trades
            .insert(trade.id, (trade.clone(), assets.clone()));

        Ok(TradeSwapOutcome {
            trade,
            assets,
            updated_picks,
            moved_entries,
        })
    }
}

#[async_trait]
impl QueueRepository for MemoryStore {
    async fn get(&self, league_id: Uuid, team_id: Uuid) -> DomainResult<Option<TeamQueue>> {
        Ok(self.lock()?.queues.get(&(league_id, team_id)).cloned())
    }

    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<TeamQueue>> {
        Ok(self
            .lock()?
            .queues
            .values()
            .filter(|q| q.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, queue: &TeamQueue) -> DomainResult<()> {
        self.lock()?
            .queues
            .insert((queue.league_id, queue.team_id), queue.clone());
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn append(&self, entry: &ActivityEntry) -> DomainResult<()> {
        self.lock()?.activity.push(entry.clone());
        Ok(())
    }

    async fn list(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<ActivityEntry>> {
        let state = self.lock()?;
        let mut entries: Vec<ActivityEntry> = state
            .activity
            .iter()
            .filter(|e| e.league_id == league_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{build_board, DraftType, Position, ProposedAsset};

    fn seeded_store() -> (MemoryStore, Uuid, Uuid, Uuid) {
        let store = MemoryStore::new();
        let league_id = Uuid::new_v4();
        let team_a = Team::new(league_id, "A".to_string(), 1).unwrap();
        let team_b = Team::new(league_id, "B".to_string(), 2).unwrap();
        let (a, b) = (team_a.id, team_b.id);
        store.insert_team(team_a);
        store.insert_team(team_b);
        (store, league_id, a, b)
    }

    #[tokio::test]
    async fn test_list_available_orders_by_rank_nulls_last() {
        let (store, league_id, _, _) = seeded_store();

        let mut unranked = Player::new("Unranked".to_string(), Position::WR);
        unranked.id = Uuid::from_u128(1);
        let ranked_5 = Player::new("Five".to_string(), Position::RB).with_rank(5);
        let ranked_1 = Player::new("One".to_string(), Position::QB).with_rank(1);
        store.insert_player(unranked.clone());
        store.insert_player(ranked_5.clone());
        store.insert_player(ranked_1.clone());

        let available = PlayerRepository::list_available(&store, league_id, 10)
            .await
            .unwrap();
        assert_eq!(available[0].id, ranked_1.id);
        assert_eq!(available[1].id, ranked_5.id);
        assert_eq!(available[2].id, unranked.id);
    }

    #[tokio::test]
    async fn test_keeper_excluded_from_pool() {
        let (store, league_id, team_a, _) = seeded_store();
        let keeper = Player::new("Kept".to_string(), Position::RB).with_rank(1);
        store.insert_player(keeper.clone());
        store.declare_keeper(league_id, team_a, keeper.id, 3);

        let available = PlayerRepository::list_available(&store, league_id, 10)
            .await
            .unwrap();
        assert!(available.is_empty());
    }

    #[tokio::test]
    async fn test_commit_selection_guards_double_draft() {
        let (store, league_id, team_a, team_b) = seeded_store();
        let board = build_board(league_id, 2026, DraftType::Linear, 1, &[team_a, team_b]).unwrap();
        store
            .replace_board(league_id, 2026, &board)
            .await
            .unwrap();

        let player = Player::new("Hot Commodity".to_string(), Position::RB);
        store.insert_player(player.clone());

        let mut pick1 = board[0].clone();
        pick1.select(player.id).unwrap();
        let commit = SelectionCommit {
            pick: pick1.clone(),
            roster_entry: RosterEntry::drafted(league_id, team_a, player.id),
            state: DraftState::initial(league_id),
        };
        store.commit_selection(&commit).await.unwrap();

        // Second team tries to take the same player with the next pick
        let mut pick2 = board[1].clone();
        pick2.select(player.id).unwrap();
        let second = SelectionCommit {
            pick: pick2,
            roster_entry: RosterEntry::drafted(league_id, team_b, player.id),
            state: DraftState::initial(league_id),
        };
        let result = store.commit_selection(&second).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_execute_swap_is_all_or_nothing() {
        let (store, league_id, team_a, team_b) = seeded_store();
        let board = build_board(league_id, 2026, DraftType::Linear, 2, &[team_a, team_b]).unwrap();
        store
            .replace_board(league_id, 2026, &board)
            .await
            .unwrap();

        // Trade pick #1 (A) for a player B no longer has
        let ghost = Uuid::new_v4();
        let assets = vec![
            ProposedAsset {
                from_team_id: team_a,
                asset: AssetRef::DraftPick {
                    pick_id: board[0].id,
                },
            },
            ProposedAsset {
                from_team_id: team_b,
                asset: AssetRef::Player { player_id: ghost },
            },
        ];
        let (trade, trade_assets) = Trade::propose(league_id, team_a, team_b, &assets).unwrap();
        TradeRepository::create(&store, &trade, &trade_assets)
            .await
            .unwrap();

        let result = store.execute_swap(trade.id, 2026, false).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));

        // Pick #1 must still belong to A and the trade must still be pending
        let pick = PickRepository::get(&store, board[0].id).await.unwrap().unwrap();
        assert_eq!(pick.current_owner_team_id, team_a);
        let (reloaded, _) = store.get_with_assets(trade.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, TradeStatus::Pending);
    }

    #[tokio::test]
    async fn test_execute_swap_materializes_future_pick() {
        let (store, league_id, team_a, team_b) = seeded_store();
        let board = build_board(league_id, 2026, DraftType::Linear, 1, &[team_a, team_b]).unwrap();
        store
            .replace_board(league_id, 2026, &board)
            .await
            .unwrap();

        let assets = vec![
            ProposedAsset {
                from_team_id: team_a,
                asset: AssetRef::DraftPick {
                    pick_id: board[0].id,
                },
            },
            ProposedAsset {
                from_team_id: team_b,
                asset: AssetRef::FuturePick {
                    season: 2027,
                    round: 1,
                },
            },
        ];
        let (trade, trade_assets) = Trade::propose(league_id, team_a, team_b, &assets).unwrap();
        TradeRepository::create(&store, &trade, &trade_assets)
            .await
            .unwrap();

        let outcome = store.execute_swap(trade.id, 2026, false).await.unwrap();
        assert_eq!(outcome.trade.status, TradeStatus::Completed);
        assert_eq!(outcome.updated_picks.len(), 2);

        let future = store
            .find_future(league_id, 2027, 1, team_b)
            .await
            .unwrap()
            .expect("future pick materialized");
        assert_eq!(future.current_owner_team_id, team_a);
        assert_eq!(future.original_owner_team_id, team_b);
    }

    #[tokio::test]
    async fn test_reset_league_restores_board_and_keepers() {
        let (store, league_id, team_a, team_b) = seeded_store();
        let board = build_board(league_id, 2026, DraftType::Linear, 1, &[team_a, team_b]).unwrap();
        store
            .replace_board(league_id, 2026, &board)
            .await
            .unwrap();

        let kept = Player::new("Kept".to_string(), Position::QB);
        let drafted = Player::new("Drafted".to_string(), Position::RB);
        store.insert_player(kept.clone());
        store.insert_player(drafted.clone());
        store.declare_keeper(league_id, team_b, kept.id, 2);

        let mut pick1 = board[0].clone();
        pick1.select(drafted.id).unwrap();
        store
            .commit_selection(&SelectionCommit {
                pick: pick1,
                roster_entry: RosterEntry::drafted(league_id, team_a, drafted.id),
                state: DraftState::initial(league_id),
            })
            .await
            .unwrap();

        let fresh = store.reset_league(league_id, 2026).await.unwrap();
        assert_eq!(fresh.status, domain::models::DraftStatus::NotStarted);

        let picks = store.list_season(league_id, 2026).await.unwrap();
        assert!(picks.iter().all(|p| !p.is_complete));
        assert!(picks
            .iter()
            .all(|p| p.current_owner_team_id == p.original_owner_team_id));

        let rosters = RosterRepository::list(&store, league_id).await.unwrap();
        assert_eq!(rosters.len(), 1);
        assert!(rosters[0].is_keeper);
    }
}
