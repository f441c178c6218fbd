use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::LeagueSettings;

/// Read-only access to league configuration. League CRUD lives outside the
/// draft core.
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn get(&self, league_id: Uuid) -> DomainResult<Option<LeagueSettings>>;
}
