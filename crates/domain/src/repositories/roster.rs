use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::RosterEntry;

#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<RosterEntry>>;

    async fn list_by_team(&self, league_id: Uuid, team_id: Uuid)
        -> DomainResult<Vec<RosterEntry>>;

    async fn get_by_player(
        &self,
        league_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<Option<RosterEntry>>;

    /// Insert a roster entry directly. Used for keeper declarations before
    /// the draft; drafted entries go through `commit_selection`.
    async fn create(&self, entry: &RosterEntry) -> DomainResult<RosterEntry>;
}
