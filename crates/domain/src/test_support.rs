//! Mock gateway implementations shared by the unit tests.

use std::sync::Arc;

use mockall::mock;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{
    ActivityEntry, DraftPick, DraftState, LeagueSettings, Player, RosterEntry, Team, TeamQueue,
    Trade, TradeAsset,
};
use crate::repositories::{
    ActivityRepository, DraftStateRepository, Gateway, LeagueRepository, PickRepository,
    PlayerRepository, QueueRepository, RosterRepository, SelectionCommit, SelectionUndo,
    TeamRepository, TradeRepository, TradeSwapOutcome,
};

mock! {
    pub LeagueRepo {}
    #[async_trait::async_trait]
    impl LeagueRepository for LeagueRepo {
        async fn get(&self, league_id: Uuid) -> DomainResult<Option<LeagueSettings>>;
    }
}

mock! {
    pub DraftStateRepo {}
    #[async_trait::async_trait]
    impl DraftStateRepository for DraftStateRepo {
        async fn get(&self, league_id: Uuid) -> DomainResult<Option<DraftState>>;
        async fn upsert(&self, state: &DraftState) -> DomainResult<()>;
        async fn reset_league(&self, league_id: Uuid, season: i32) -> DomainResult<DraftState>;
    }
}

mock! {
    pub TeamRepo {}
    #[async_trait::async_trait]
    impl TeamRepository for TeamRepo {
        async fn get(&self, team_id: Uuid) -> DomainResult<Option<Team>>;
        async fn list(&self, league_id: Uuid) -> DomainResult<Vec<Team>>;
        async fn update_draft_positions(
            &self,
            league_id: Uuid,
            ordered_team_ids: &[Uuid],
        ) -> DomainResult<()>;
    }
}

mock! {
    pub PlayerRepo {}
    #[async_trait::async_trait]
    impl PlayerRepository for PlayerRepo {
        async fn get(&self, player_id: Uuid) -> DomainResult<Option<Player>>;
        async fn list_available(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<Player>>;
    }
}

mock! {
    pub PickRepo {}
    #[async_trait::async_trait]
    impl PickRepository for PickRepo {
        async fn get(&self, pick_id: Uuid) -> DomainResult<Option<DraftPick>>;
        async fn get_by_overall(
            &self,
            league_id: Uuid,
            season: i32,
            overall_pick: i32,
        ) -> DomainResult<Option<DraftPick>>;
        async fn list_season(&self, league_id: Uuid, season: i32) -> DomainResult<Vec<DraftPick>>;
        async fn find_future(
            &self,
            league_id: Uuid,
            season: i32,
            round: i32,
            original_owner_team_id: Uuid,
        ) -> DomainResult<Option<DraftPick>>;
        async fn replace_board(
            &self,
            league_id: Uuid,
            season: i32,
            picks: &[DraftPick],
        ) -> DomainResult<()>;
        async fn commit_selection(&self, commit: &SelectionCommit) -> DomainResult<()>;
        async fn undo_selection(&self, undo: &SelectionUndo) -> DomainResult<()>;
    }
}

mock! {
    pub RosterRepo {}
    #[async_trait::async_trait]
    impl RosterRepository for RosterRepo {
        async fn list(&self, league_id: Uuid) -> DomainResult<Vec<RosterEntry>>;
        async fn list_by_team(
            &self,
            league_id: Uuid,
            team_id: Uuid,
        ) -> DomainResult<Vec<RosterEntry>>;
        async fn get_by_player(
            &self,
            league_id: Uuid,
            player_id: Uuid,
        ) -> DomainResult<Option<RosterEntry>>;
        async fn create(&self, entry: &RosterEntry) -> DomainResult<RosterEntry>;
    }
}

mock! {
    pub TradeRepo {}
    #[async_trait::async_trait]
    impl TradeRepository for TradeRepo {
        async fn create(&self, trade: &Trade, assets: &[TradeAsset]) -> DomainResult<()>;
        async fn get_with_assets(
            &self,
            trade_id: Uuid,
        ) -> DomainResult<Option<(Trade, Vec<TradeAsset>)>>;
        async fn list_pending(
            &self,
            league_id: Uuid,
        ) -> DomainResult<Vec<(Trade, Vec<TradeAsset>)>>;
        async fn update(&self, trade: &Trade) -> DomainResult<()>;
        async fn execute_swap(
            &self,
            trade_id: Uuid,
            current_season: i32,
            forced_by_commissioner: bool,
        ) -> DomainResult<TradeSwapOutcome>;
    }
}

mock! {
    pub QueueRepo {}
    #[async_trait::async_trait]
    impl QueueRepository for QueueRepo {
        async fn get(&self, league_id: Uuid, team_id: Uuid) -> DomainResult<Option<TeamQueue>>;
        async fn list(&self, league_id: Uuid) -> DomainResult<Vec<TeamQueue>>;
        async fn upsert(&self, queue: &TeamQueue) -> DomainResult<()>;
    }
}

mock! {
    pub ActivityRepo {}
    #[async_trait::async_trait]
    impl ActivityRepository for ActivityRepo {
        async fn append(&self, entry: &ActivityEntry) -> DomainResult<()>;
        async fn list(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<ActivityEntry>>;
    }
}

/// A gateway of expectation-free mocks: any repository call panics, which is
/// exactly what tests that must not touch the store want.
pub fn mock_gateway() -> Gateway {
    Gateway {
        leagues: Arc::new(MockLeagueRepo::new()),
        draft_states: Arc::new(MockDraftStateRepo::new()),
        teams: Arc::new(MockTeamRepo::new()),
        players: Arc::new(MockPlayerRepo::new()),
        picks: Arc::new(MockPickRepo::new()),
        rosters: Arc::new(MockRosterRepo::new()),
        trades: Arc::new(MockTradeRepo::new()),
        queues: Arc::new(MockQueueRepo::new()),
        activity: Arc::new(MockActivityRepo::new()),
    }
}
