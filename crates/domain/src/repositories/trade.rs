use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::models::{DraftPick, RosterEntry, Trade, TradeAsset};

/// What an executed swap changed, for delta broadcasts.
#[derive(Debug, Clone)]
pub struct TradeSwapOutcome {
    pub trade: Trade,
    pub assets: Vec<TradeAsset>,
    /// Picks whose `current_owner_team_id` changed, including any future
    /// picks materialized by the swap.
    pub updated_picks: Vec<DraftPick>,
    /// Roster entries moved between the two teams.
    pub moved_entries: Vec<RosterEntry>,
}

#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Persist a proposal and its assets. No ownership changes.
    async fn create(&self, trade: &Trade, assets: &[TradeAsset]) -> DomainResult<()>;

    async fn get_with_assets(
        &self,
        trade_id: Uuid,
    ) -> DomainResult<Option<(Trade, Vec<TradeAsset>)>>;

    async fn list_pending(&self, league_id: Uuid)
        -> DomainResult<Vec<(Trade, Vec<TradeAsset>)>>;

    /// Write an updated trade row (terminal refusals, expiry flips).
    async fn update(&self, trade: &Trade) -> DomainResult<()>;

    /// Accept a pending trade in one transaction: verify the row is still
    /// PENDING, re-validate that every asset is still owned by its stated
    /// team and still movable, swap ownership in place (materializing
    /// future picks as needed), and mark the trade COMPLETED. A stale asset
    /// raises `Conflict`; the rollback leaves the trade PENDING.
    async fn execute_swap(
        &self,
        trade_id: Uuid,
        current_season: i32,
        forced_by_commissioner: bool,
    ) -> DomainResult<TradeSwapOutcome>;
}
