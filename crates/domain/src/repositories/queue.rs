use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::TeamQueue;

#[async_trait]
pub trait QueueRepository: Send + Sync {
    async fn get(&self, league_id: Uuid, team_id: Uuid) -> DomainResult<Option<TeamQueue>>;

    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<TeamQueue>>;

    async fn upsert(&self, queue: &TeamQueue) -> DomainResult<()>;
}
