use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    DraftStarted,
    PickMade,
    PickUndone,
    TradeProposed,
    TradeAccepted,
    TradeRejected,
    TradeVetoed,
    OrderUpdated,
    SettingsChanged,
    TimerExpired,
    AutoPick,
    DraftReset,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActivityKind::DraftStarted => "DRAFT_STARTED",
            ActivityKind::PickMade => "PICK_MADE",
            ActivityKind::PickUndone => "PICK_UNDONE",
            ActivityKind::TradeProposed => "TRADE_PROPOSED",
            ActivityKind::TradeAccepted => "TRADE_ACCEPTED",
            ActivityKind::TradeRejected => "TRADE_REJECTED",
            ActivityKind::TradeVetoed => "TRADE_VETOED",
            ActivityKind::OrderUpdated => "ORDER_UPDATED",
            ActivityKind::SettingsChanged => "SETTINGS_CHANGED",
            ActivityKind::TimerExpired => "TIMER_EXPIRED",
            ActivityKind::AutoPick => "AUTO_PICK",
            ActivityKind::DraftReset => "DRAFT_RESET",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT_STARTED" => Ok(ActivityKind::DraftStarted),
            "PICK_MADE" => Ok(ActivityKind::PickMade),
            "PICK_UNDONE" => Ok(ActivityKind::PickUndone),
            "TRADE_PROPOSED" => Ok(ActivityKind::TradeProposed),
            "TRADE_ACCEPTED" => Ok(ActivityKind::TradeAccepted),
            "TRADE_REJECTED" => Ok(ActivityKind::TradeRejected),
            "TRADE_VETOED" => Ok(ActivityKind::TradeVetoed),
            "ORDER_UPDATED" => Ok(ActivityKind::OrderUpdated),
            "SETTINGS_CHANGED" => Ok(ActivityKind::SettingsChanged),
            "TIMER_EXPIRED" => Ok(ActivityKind::TimerExpired),
            "AUTO_PICK" => Ok(ActivityKind::AutoPick),
            "DRAFT_RESET" => Ok(ActivityKind::DraftReset),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid activity kind: {}",
                s
            ))),
        }
    }
}

/// Append-only journal entry for a league decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    pub league_id: Uuid,
    pub kind: ActivityKind,
    pub data: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(league_id: Uuid, kind: ActivityKind, data: JsonValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            kind,
            data,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ActivityKind::DraftStarted,
            ActivityKind::PickMade,
            ActivityKind::PickUndone,
            ActivityKind::TradeProposed,
            ActivityKind::TradeAccepted,
            ActivityKind::TradeRejected,
            ActivityKind::TradeVetoed,
            ActivityKind::OrderUpdated,
            ActivityKind::SettingsChanged,
            ActivityKind::TimerExpired,
            ActivityKind::AutoPick,
            ActivityKind::DraftReset,
        ] {
            let parsed: ActivityKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_new_entry() {
        let league_id = Uuid::new_v4();
        let entry = ActivityEntry::new(
            league_id,
            ActivityKind::PickMade,
            serde_json::json!({ "overallPick": 1 }),
        );

        assert_eq!(entry.league_id, league_id);
        assert_eq!(entry.kind, ActivityKind::PickMade);
        assert_eq!(entry.data["overallPick"], 1);
    }
}
