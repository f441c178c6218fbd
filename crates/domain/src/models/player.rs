use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::QB => write!(f, "QB"),
            Position::RB => write!(f, "RB"),
            Position::WR => write!(f, "WR"),
            Position::TE => write!(f, "TE"),
            Position::K => write!(f, "K"),
            Position::DST => write!(f, "DST"),
        }
    }
}

impl std::str::FromStr for Position {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DST" => Ok(Position::DST),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid position: {}",
                s
            ))),
        }
    }
}

/// Catalog player, shared across leagues. Imported by an external catalog
/// service; the draft core treats identity and ranking as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub position: Position,
    pub nfl_team: Option<String>,
    pub rank: Option<i32>,
    pub adp: Option<f64>,
    pub bye_week: Option<i32>,
    pub injury_status: Option<String>,
    pub active: bool,
}

impl Player {
    pub fn new(name: String, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            position,
            nfl_team: None,
            rank: None,
            adp: None,
            bye_week: None,
            injury_status: None,
            active: true,
        }
    }

    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Auto-pick sort key: ascending rank with unranked players last, ties
    /// broken by ascending id.
    pub fn draft_order_key(&self) -> (bool, i32, Uuid) {
        (self.rank.is_none(), self.rank.unwrap_or(i32::MAX), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_round_trip() {
        for pos in [
            Position::QB,
            Position::RB,
            Position::WR,
            Position::TE,
            Position::K,
            Position::DST,
        ] {
            let parsed: Position = pos.to_string().parse().unwrap();
            assert_eq!(parsed, pos);
        }
        assert!("FB".parse::<Position>().is_err());
    }

    #[test]
    fn test_draft_order_key_ranks_before_unranked() {
        let ranked = Player::new("Ranked".to_string(), Position::RB).with_rank(5);
        let unranked = Player::new("Unranked".to_string(), Position::RB);

        assert!(ranked.draft_order_key() < unranked.draft_order_key());
    }

    #[test]
    fn test_draft_order_key_tie_break_by_id() {
        let mut a = Player::new("A".to_string(), Position::WR).with_rank(1);
        let mut b = Player::new("B".to_string(), Position::WR).with_rank(1);
        a.id = Uuid::from_u128(1);
        b.id = Uuid::from_u128(2);

        assert!(a.draft_order_key() < b.draft_order_key());
    }
}
