use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::Player;

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn get(&self, player_id: Uuid) -> DomainResult<Option<Player>>;

    /// Active players with no roster entry in the league (drafted and
    /// keeper players both occupy roster rows), ordered by ascending rank
    /// with unranked players last, ties broken by ascending id.
    async fn list_available(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<Player>>;
}
