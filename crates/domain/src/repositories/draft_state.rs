use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::DraftState;

#[async_trait]
pub trait DraftStateRepository: Send + Sync {
    async fn get(&self, league_id: Uuid) -> DomainResult<Option<DraftState>>;

    async fn upsert(&self, state: &DraftState) -> DomainResult<()>;

    /// Full draft reset in one transaction: delete future-season picks,
    /// reopen every current-season pick and restore its original owner,
    /// delete all non-keeper roster entries, cancel pending trades, and
    /// write the initial draft state. Returns the fresh state.
    async fn reset_league(&self, league_id: Uuid, season: i32) -> DomainResult<DraftState>;
}
