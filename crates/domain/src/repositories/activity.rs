use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::ActivityEntry;

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn append(&self, entry: &ActivityEntry) -> DomainResult<()>;

    /// Most recent entries first.
    async fn list(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<ActivityEntry>>;
}
