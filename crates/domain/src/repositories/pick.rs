use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{DraftPick, DraftState, RosterEntry};

/// Everything a committed selection writes, computed by the coordinator
/// under its serial queue and applied by the store in one transaction.
#[derive(Debug, Clone)]
pub struct SelectionCommit {
    /// The current pick with its selection filled in.
    pub pick: DraftPick,
    /// Roster entry for the drafting team.
    pub roster_entry: RosterEntry,
    /// Draft state after advancing to the next pick (or completing).
    pub state: DraftState,
}

/// Reversal of the most recent selection.
#[derive(Debug, Clone)]
pub struct SelectionUndo {
    /// The pick with its selection cleared.
    pub pick: DraftPick,
    /// Roster row to remove.
    pub team_id: Uuid,
    pub player_id: Uuid,
    /// Draft state with the pick back on the clock.
    pub state: DraftState,
}

#[async_trait]
pub trait PickRepository: Send + Sync {
    async fn get(&self, pick_id: Uuid) -> DomainResult<Option<DraftPick>>;

    async fn get_by_overall(
        &self,
        league_id: Uuid,
        season: i32,
        overall_pick: i32,
    ) -> DomainResult<Option<DraftPick>>;

    /// All picks of one season ordered by `overall_pick`.
    async fn list_season(&self, league_id: Uuid, season: i32) -> DomainResult<Vec<DraftPick>>;

    /// A future-season pick by its generation coordinates, whether or not
    /// it has been materialized by a trade yet.
    async fn find_future(
        &self,
        league_id: Uuid,
        season: i32,
        round: i32,
        original_owner_team_id: Uuid,
    ) -> DomainResult<Option<DraftPick>>;

    /// Delete and regenerate one season's board. Refuses nothing; the
    /// coordinator only calls this before the draft starts.
    async fn replace_board(
        &self,
        league_id: Uuid,
        season: i32,
        picks: &[DraftPick],
    ) -> DomainResult<()>;

    /// Apply a selection atomically: guard that the pick is still open and
    /// the player is still unrostered (row locks in SQL stores), then write
    /// the pick, the roster entry and the draft state together. A failed
    /// guard raises `Conflict` and leaves everything untouched.
    async fn commit_selection(&self, commit: &SelectionCommit) -> DomainResult<()>;

    /// Reverse a selection atomically: clear the pick, delete the roster
    /// row, restore the draft state.
    async fn undo_selection(&self, undo: &SelectionUndo) -> DomainResult<()>;
}
