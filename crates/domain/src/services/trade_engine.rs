use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::{ProposedAsset, Trade, TradeAsset};
use crate::repositories::{Gateway, TradeRepository, TradeSwapOutcome};

/// Two-phase trade processing: proposals are pure writes; acceptance runs
/// the re-validation and atomic swap inside the store. The coordinator owns
/// the engine and calls it under its serial queue so acceptance can never
/// race a pick on the same league.
pub struct TradeEngine {
    gateway: Gateway,
}

impl TradeEngine {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Write a proposal and its assets. No ownership changes here.
    pub async fn propose(
        &self,
        league_id: Uuid,
        initiator_team_id: Uuid,
        receiver_team_id: Uuid,
        assets: &[ProposedAsset],
    ) -> DomainResult<(Trade, Vec<TradeAsset>)> {
        let (trade, trade_assets) =
            Trade::propose(league_id, initiator_team_id, receiver_team_id, assets)?;

        self.gateway.trades.create(&trade, &trade_assets).await?;

        info!(
            league_id = %league_id,
            trade_id = %trade.id,
            "Trade proposed"
        );
        Ok((trade, trade_assets))
    }

    /// Load a trade, flipping it to EXPIRED on touch when its lifetime has
    /// lapsed. Only PENDING trades come back successfully.
    pub async fn load_pending(&self, trade_id: Uuid) -> DomainResult<(Trade, Vec<TradeAsset>)> {
        let (mut trade, assets) = self
            .gateway
            .trades
            .get_with_assets(trade_id)
            .await?
            .ok_or_else(|| DomainError::TradeNotFound(format!("Trade {} not found", trade_id)))?;

        if trade.is_expired_at(Utc::now()) {
            trade.expire()?;
            self.gateway.trades.update(&trade).await?;
            return Err(DomainError::TradeExpired(format!(
                "Trade {} expired at {}",
                trade_id, trade.expires_at
            )));
        }

        if trade.status != crate::models::TradeStatus::Pending {
            return Err(DomainError::InvalidState(format!(
                "Trade {} is {}",
                trade_id, trade.status
            )));
        }

        Ok((trade, assets))
    }

    /// Accept: the store re-validates every asset and swaps ownership in
    /// one transaction. A stale asset rolls everything back, leaving the
    /// trade PENDING, and surfaces as `Conflict`.
    pub async fn accept(
        &self,
        trade_id: Uuid,
        current_season: i32,
        forced_by_commissioner: bool,
    ) -> DomainResult<TradeSwapOutcome> {
        let outcome = self
            .gateway
            .trades
            .execute_swap(trade_id, current_season, forced_by_commissioner)
            .await?;

        info!(
            trade_id = %trade_id,
            picks_moved = outcome.updated_picks.len(),
            players_moved = outcome.moved_entries.len(),
            forced = forced_by_commissioner,
            "Trade executed"
        );
        Ok(outcome)
    }

    pub async fn reject(&self, trade_id: Uuid) -> DomainResult<Trade> {
        let (mut trade, _) = self.load_pending(trade_id).await?;
        trade.reject()?;
        self.gateway.trades.update(&trade).await?;
        Ok(trade)
    }

    pub async fn cancel(&self, trade_id: Uuid) -> DomainResult<Trade> {
        let (mut trade, _) = self.load_pending(trade_id).await?;
        trade.cancel()?;
        self.gateway.trades.update(&trade).await?;
        Ok(trade)
    }

    pub async fn veto(&self, trade_id: Uuid, notes: Option<String>) -> DomainResult<Trade> {
        let (mut trade, _) = self.load_pending(trade_id).await?;
        trade.veto(notes)?;
        self.gateway.trades.update(&trade).await?;
        Ok(trade)
    }
}
