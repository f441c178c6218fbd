use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::Team;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn get(&self, team_id: Uuid) -> DomainResult<Option<Team>>;

    /// All teams in the league ordered by `draft_position`.
    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<Team>>;

    /// Rewrite draft positions so `ordered_team_ids[i]` gets position
    /// `i + 1`. The caller has already checked the list is a permutation of
    /// the league's teams.
    async fn update_draft_positions(
        &self,
        league_id: Uuid,
        ordered_team_ids: &[Uuid],
    ) -> DomainResult<()>;
}
