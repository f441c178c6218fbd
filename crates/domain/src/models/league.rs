use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// How the per-round team order is derived from draft positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftType {
    Snake,
    Linear,
}

impl std::fmt::Display for DraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftType::Snake => write!(f, "SNAKE"),
            DraftType::Linear => write!(f, "LINEAR"),
        }
    }
}

impl std::str::FromStr for DraftType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SNAKE" => Ok(DraftType::Snake),
            "LINEAR" => Ok(DraftType::Linear),
            _ => Err(DomainError::ValidationError(format!(
                "Invalid draft type: {}",
                s
            ))),
        }
    }
}

/// Roster template: starter counts per position plus bench slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSettings {
    pub starters: BTreeMap<String, i32>,
    pub bench: i32,
}

impl RosterSettings {
    pub fn total_slots(&self) -> i32 {
        self.starters.values().sum::<i32>() + self.bench
    }
}

/// Static league configuration. Leagues are created and edited outside the
/// draft core; the coordinator only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettings {
    pub id: Uuid,
    pub name: String,
    pub season: i32,
    pub max_teams: i32,
    pub commissioner_user_id: Uuid,
    pub roster: RosterSettings,
    pub draft_type: DraftType,
    pub total_rounds: i32,
    pub timer_seconds: i32,
    pub reserve_seconds: i32,
    pub pause_on_trade: bool,
    pub max_keepers: i32,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub keeper_deadline: Option<DateTime<Utc>>,
}

impl LeagueSettings {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        season: i32,
        max_teams: i32,
        commissioner_user_id: Uuid,
        roster: RosterSettings,
        draft_type: DraftType,
        total_rounds: i32,
        timer_seconds: i32,
    ) -> DomainResult<Self> {
        Self::validate_max_teams(max_teams)?;
        Self::validate_rounds(total_rounds)?;
        Self::validate_timer(timer_seconds)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            season,
            max_teams,
            commissioner_user_id,
            roster,
            draft_type,
            total_rounds,
            timer_seconds,
            reserve_seconds: 0,
            pause_on_trade: true,
            max_keepers: 0,
            scheduled_start: None,
            keeper_deadline: None,
        })
    }

    fn validate_max_teams(max_teams: i32) -> DomainResult<()> {
        if !(2..=20).contains(&max_teams) {
            return Err(DomainError::ValidationError(
                "League must have between 2 and 20 teams".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_rounds(rounds: i32) -> DomainResult<()> {
        if !(1..=30).contains(&rounds) {
            return Err(DomainError::ValidationError(
                "Total rounds must be between 1 and 30".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_timer(timer_seconds: i32) -> DomainResult<()> {
        if !(10..=3600).contains(&timer_seconds) {
            return Err(DomainError::ValidationError(
                "Timer duration must be between 10 and 3600 seconds".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> RosterSettings {
        let mut starters = BTreeMap::new();
        starters.insert("QB".to_string(), 1);
        starters.insert("RB".to_string(), 2);
        starters.insert("WR".to_string(), 2);
        starters.insert("TE".to_string(), 1);
        RosterSettings { starters, bench: 6 }
    }

    #[test]
    fn test_new_league() {
        let league = LeagueSettings::new(
            "Test League".to_string(),
            2026,
            10,
            Uuid::new_v4(),
            roster(),
            DraftType::Snake,
            15,
            90,
        )
        .unwrap();

        assert_eq!(league.max_teams, 10);
        assert_eq!(league.total_rounds, 15);
        assert_eq!(league.timer_seconds, 90);
        assert!(league.pause_on_trade);
    }

    #[test]
    fn test_invalid_team_count() {
        let result = LeagueSettings::new(
            "Solo".to_string(),
            2026,
            1,
            Uuid::new_v4(),
            roster(),
            DraftType::Linear,
            15,
            90,
        );
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_roster_total_slots() {
        assert_eq!(roster().total_slots(), 12);
    }

    #[test]
    fn test_draft_type_round_trip() {
        for dt in [DraftType::Snake, DraftType::Linear] {
            let parsed: DraftType = dt.to_string().parse().unwrap();
            assert_eq!(parsed, dt);
        }
        assert!("AUCTION".parse::<DraftType>().is_err());
    }
}
