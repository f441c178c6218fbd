use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::models::ProposedAsset;

/// Server-to-client events are the domain's broadcast payloads; the wire
/// discriminant for both directions is the `event` field.
pub use domain::events::ServerEvent as ServerMessage;

/// Client intents routed through the subscription hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Enter a league's draft room; answered with a full `StateSync`.
    JoinDraftRoom {
        league_id: Uuid,
        team_id: Option<Uuid>,
    },
    LeaveDraftRoom {
        league_id: Uuid,
    },
    StartDraft {
        league_id: Uuid,
    },
    PauseDraft {
        league_id: Uuid,
        reason: Option<String>,
    },
    ResumeDraft {
        league_id: Uuid,
    },
    MakePick {
        league_id: Uuid,
        team_id: Uuid,
        player_id: Uuid,
    },
    /// Commissioner pick for whichever team is on the clock.
    ForcePick {
        league_id: Uuid,
        player_id: Uuid,
    },
    UndoLastPick {
        league_id: Uuid,
    },
    ResetDraft {
        league_id: Uuid,
    },
    UpdateOrder {
        league_id: Uuid,
        team_ids: Vec<Uuid>,
    },
    ProposeTrade {
        league_id: Uuid,
        receiver_team_id: Uuid,
        assets: Vec<ProposedAsset>,
    },
    AcceptTrade {
        league_id: Uuid,
        trade_id: Uuid,
    },
    RejectTrade {
        league_id: Uuid,
        trade_id: Uuid,
    },
    CancelTrade {
        league_id: Uuid,
        trade_id: Uuid,
    },
    ForceAcceptTrade {
        league_id: Uuid,
        trade_id: Uuid,
    },
    VetoTrade {
        league_id: Uuid,
        trade_id: Uuid,
        notes: Option<String>,
    },
    UpdateQueue {
        league_id: Uuid,
        team_id: Uuid,
        player_ids: Vec<Uuid>,
    },
    /// Keep-alive; answered with `Pong`.
    Ping,
}

impl ClientMessage {
    /// Parse a JSON string into a ClientMessage
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The league this intent addresses, if any.
    pub fn league_id(&self) -> Option<Uuid> {
        match self {
            ClientMessage::JoinDraftRoom { league_id, .. }
            | ClientMessage::LeaveDraftRoom { league_id }
            | ClientMessage::StartDraft { league_id }
            | ClientMessage::PauseDraft { league_id, .. }
            | ClientMessage::ResumeDraft { league_id }
            | ClientMessage::MakePick { league_id, .. }
            | ClientMessage::ForcePick { league_id, .. }
            | ClientMessage::UndoLastPick { league_id }
            | ClientMessage::ResetDraft { league_id }
            | ClientMessage::UpdateOrder { league_id, .. }
            | ClientMessage::ProposeTrade { league_id, .. }
            | ClientMessage::AcceptTrade { league_id, .. }
            | ClientMessage::RejectTrade { league_id, .. }
            | ClientMessage::CancelTrade { league_id, .. }
            | ClientMessage::ForceAcceptTrade { league_id, .. }
            | ClientMessage::VetoTrade { league_id, .. }
            | ClientMessage::UpdateQueue { league_id, .. } => Some(*league_id),
            ClientMessage::Ping => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_round_trip() {
        let msg = ClientMessage::JoinDraftRoom {
            league_id: Uuid::from_u128(9),
            team_id: None,
        };
        let json = msg.to_json().unwrap();
        assert!(json.contains("\"event\":\"JoinDraftRoom\""));
        assert!(json.contains("leagueId"));

        let parsed = ClientMessage::from_json(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_make_pick_fields_are_camel_case() {
        let msg = ClientMessage::MakePick {
            league_id: Uuid::from_u128(1),
            team_id: Uuid::from_u128(2),
            player_id: Uuid::from_u128(3),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["event"], "MakePick");
        assert!(json.get("teamId").is_some());
        assert!(json.get("playerId").is_some());
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result = ClientMessage::from_json(r#"{"event":"Nonsense"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_league_id_extraction() {
        let league_id = Uuid::from_u128(4);
        let msg = ClientMessage::ResetDraft { league_id };
        assert_eq!(msg.league_id(), Some(league_id));
        assert_eq!(ClientMessage::Ping.league_id(), None);
    }

    #[test]
    fn test_propose_trade_asset_payload() {
        let json = r#"{
            "event": "ProposeTrade",
            "leagueId": "00000000-0000-0000-0000-000000000001",
            "receiverTeamId": "00000000-0000-0000-0000-000000000002",
            "assets": [
                {
                    "fromTeamId": "00000000-0000-0000-0000-000000000003",
                    "assetKind": "FUTURE_PICK",
                    "season": 2027,
                    "round": 2
                }
            ]
        }"#;
        let msg = ClientMessage::from_json(json).unwrap();
        match msg {
            ClientMessage::ProposeTrade { assets, .. } => {
                assert_eq!(assets.len(), 1);
            }
            other => panic!("Expected ProposeTrade, got {:?}", other),
        }
    }
}
