use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{AssetRef, Trade, TradeAsset};

use crate::errors::{DbError, DbResult};

/// Database model for the trades table.
#[derive(Debug, Clone, FromRow)]
pub struct TradeRow {
    pub id: Uuid,
    pub league_id: Uuid,
    pub initiator_team_id: Uuid,
    pub receiver_team_id: Uuid,
    pub status: String,
    pub proposed_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub forced_by_commissioner: bool,
    pub commissioner_notes: Option<String>,
}

impl TradeRow {
    pub fn from_domain(trade: &Trade) -> Self {
        Self {
            id: trade.id,
            league_id: trade.league_id,
            initiator_team_id: trade.initiator_team_id,
            receiver_team_id: trade.receiver_team_id,
            status: trade.status.to_string(),
            proposed_at: trade.proposed_at,
            responded_at: trade.responded_at,
            processed_at: trade.processed_at,
            expires_at: trade.expires_at,
            forced_by_commissioner: trade.forced_by_commissioner,
            commissioner_notes: trade.commissioner_notes.clone(),
        }
    }

    pub fn to_domain(&self) -> DbResult<Trade> {
        Ok(Trade {
            id: self.id,
            league_id: self.league_id,
            initiator_team_id: self.initiator_team_id,
            receiver_team_id: self.receiver_team_id,
            status: self
                .status
                .parse()
                .map_err(|e: domain::DomainError| DbError::MappingError(e.to_string()))?,
            proposed_at: self.proposed_at,
            responded_at: self.responded_at,
            processed_at: self.processed_at,
            expires_at: self.expires_at,
            forced_by_commissioner: self.forced_by_commissioner,
            commissioner_notes: self.commissioner_notes.clone(),
        })
    }
}

/// Database model for the trade_assets table. Exactly one of the variant
/// column groups is populated, keyed by `asset_kind`.
#[derive(Debug, Clone, FromRow)]
pub struct TradeAssetRow {
    pub id: Uuid,
    pub trade_id: Uuid,
    pub from_team_id: Uuid,
    pub asset_kind: String,
    pub draft_pick_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub future_pick_season: Option<i32>,
    pub future_pick_round: Option<i32>,
}

impl TradeAssetRow {
    pub fn from_domain(asset: &TradeAsset) -> Self {
        let (kind, draft_pick_id, player_id, season, round) = match &asset.asset {
            AssetRef::DraftPick { pick_id } => ("DRAFT_PICK", Some(*pick_id), None, None, None),
            AssetRef::Player { player_id } => ("PLAYER", None, Some(*player_id), None, None),
            AssetRef::FuturePick { season, round } => {
                ("FUTURE_PICK", None, None, Some(*season), Some(*round))
            }
        };

        Self {
            id: asset.id,
            trade_id: asset.trade_id,
            from_team_id: asset.from_team_id,
            asset_kind: kind.to_string(),
            draft_pick_id,
            player_id,
            future_pick_season: season,
            future_pick_round: round,
        }
    }

    pub fn to_domain(&self) -> DbResult<TradeAsset> {
        let asset = match self.asset_kind.as_str() {
            "DRAFT_PICK" => AssetRef::DraftPick {
                pick_id: self.draft_pick_id.ok_or_else(|| {
                    DbError::MappingError("DRAFT_PICK asset without a pick id".to_string())
                })?,
            },
            "PLAYER" => AssetRef::Player {
                player_id: self.player_id.ok_or_else(|| {
                    DbError::MappingError("PLAYER asset without a player id".to_string())
                })?,
            },
            "FUTURE_PICK" => AssetRef::FuturePick {
                season: self.future_pick_season.ok_or_else(|| {
                    DbError::MappingError("FUTURE_PICK asset without a season".to_string())
                })?,
                round: self.future_pick_round.ok_or_else(|| {
                    DbError::MappingError("FUTURE_PICK asset without a round".to_string())
                })?,
            },
            other => {
                return Err(DbError::MappingError(format!(
                    "Unknown asset kind: {}",
                    other
                )))
            }
        };

        Ok(TradeAsset {
            id: self.id,
            trade_id: self.trade_id,
            from_team_id: self.from_team_id,
            asset,
        })
    }
}
