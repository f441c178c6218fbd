use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
    Cancelled,
    Vetoed,
    Expired,
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeStatus::Pending => write!(f, "PENDING"),
            TradeStatus::Processing => write!(f, "PROCESSING"),
            TradeStatus::Completed => write!(f, "COMPLETED"),
            TradeStatus::Rejected => write!(f, "REJECTED"),
            TradeStatus::Cancelled => write!(f, "CANCELLED"),
            TradeStatus::Vetoed => write!(f, "VETOED"),
            TradeStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

impl std::str::FromStr for TradeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TradeStatus::Pending),
            "PROCESSING" => Ok(TradeStatus::Processing),
            "COMPLETED" => Ok(TradeStatus::Completed),
            "REJECTED" => Ok(TradeStatus::Rejected),
            "CANCELLED" => Ok(TradeStatus::Cancelled),
            "VETOED" => Ok(TradeStatus::Vetoed),
            "EXPIRED" => Ok(TradeStatus::Expired),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid trade status: {}",
                s
            ))),
        }
    }
}

/// What a trade asset points at. Future picks are identified by
/// `(season, round)` relative to the giving team until a real pick row is
/// materialized on first acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "assetKind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all_fields = "camelCase")]
pub enum AssetRef {
    DraftPick { pick_id: Uuid },
    Player { player_id: Uuid },
    FuturePick { season: i32, round: i32 },
}

/// One side's contribution to a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAsset {
    pub id: Uuid,
    pub trade_id: Uuid,
    pub from_team_id: Uuid,
    #[serde(flatten)]
    pub asset: AssetRef,
}

impl TradeAsset {
    pub fn new(trade_id: Uuid, from_team_id: Uuid, asset: AssetRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            trade_id,
            from_team_id,
            asset,
        }
    }
}

/// An asset as submitted in a trade proposal, before the trade row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAsset {
    pub from_team_id: Uuid,
    #[serde(flatten)]
    pub asset: AssetRef,
}

/// Default proposal lifetime when the proposer does not set one.
pub const DEFAULT_TRADE_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    pub league_id: Uuid,
    pub initiator_team_id: Uuid,
    pub receiver_team_id: Uuid,
    pub status: TradeStatus,
    pub proposed_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub forced_by_commissioner: bool,
    pub commissioner_notes: Option<String>,
}

impl Trade {
    pub fn propose(
        league_id: Uuid,
        initiator_team_id: Uuid,
        receiver_team_id: Uuid,
        proposed_assets: &[ProposedAsset],
    ) -> DomainResult<(Self, Vec<TradeAsset>)> {
        if initiator_team_id == receiver_team_id {
            return Err(DomainError::ValidationError(
                "Cannot trade with the same team".to_string(),
            ));
        }
        Self::validate_assets(initiator_team_id, receiver_team_id, proposed_assets)?;

        let now = Utc::now();
        let trade = Self {
            id: Uuid::new_v4(),
            league_id,
            initiator_team_id,
            receiver_team_id,
            status: TradeStatus::Pending,
            proposed_at: now,
            responded_at: None,
            processed_at: None,
            expires_at: now + Duration::hours(DEFAULT_TRADE_TTL_HOURS),
            forced_by_commissioner: false,
            commissioner_notes: None,
        };

        let assets = proposed_assets
            .iter()
            .map(|a| TradeAsset::new(trade.id, a.from_team_id, a.asset.clone()))
            .collect();

        Ok((trade, assets))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == TradeStatus::Pending && self.expires_at <= now
    }

    pub fn begin_processing(&mut self) -> DomainResult<()> {
        match self.status {
            TradeStatus::Pending => {
                self.status = TradeStatus::Processing;
                Ok(())
            }
            _ => Err(DomainError::InvalidState(format!(
                "Cannot accept a trade that is {}",
                self.status
            ))),
        }
    }

    pub fn complete(&mut self, forced_by_commissioner: bool) -> DomainResult<()> {
        match self.status {
            TradeStatus::Processing => {
                let now = Utc::now();
                self.status = TradeStatus::Completed;
                self.responded_at = Some(now);
                self.processed_at = Some(now);
                self.forced_by_commissioner = forced_by_commissioner;
                Ok(())
            }
            _ => Err(DomainError::InvalidState(format!(
                "Cannot complete a trade that is {}",
                self.status
            ))),
        }
    }

    pub fn reject(&mut self) -> DomainResult<()> {
        self.refuse(TradeStatus::Rejected)
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.refuse(TradeStatus::Cancelled)
    }

    pub fn veto(&mut self, notes: Option<String>) -> DomainResult<()> {
        self.refuse(TradeStatus::Vetoed)?;
        self.commissioner_notes = notes;
        Ok(())
    }

    pub fn expire(&mut self) -> DomainResult<()> {
        self.refuse(TradeStatus::Expired)
    }

    fn refuse(&mut self, terminal: TradeStatus) -> DomainResult<()> {
        match self.status {
            TradeStatus::Pending => {
                self.status = terminal;
                self.responded_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(DomainError::InvalidState(format!(
                "Cannot move a {} trade to {}",
                self.status, terminal
            ))),
        }
    }

    fn validate_assets(
        initiator: Uuid,
        receiver: Uuid,
        assets: &[ProposedAsset],
    ) -> DomainResult<()> {
        if assets.is_empty() {
            return Err(DomainError::ValidationError(
                "Trade must include at least one asset".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for asset in assets {
            if asset.from_team_id != initiator && asset.from_team_id != receiver {
                return Err(DomainError::ValidationError(
                    "Trade asset does not belong to either party".to_string(),
                ));
            }
            if !seen.insert(&asset.asset) {
                return Err(DomainError::ValidationError(
                    "Duplicate asset in trade".to_string(),
                ));
            }
        }

        Ok(())
    }
}
