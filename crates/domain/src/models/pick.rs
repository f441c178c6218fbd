use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::DraftType;

/// A single selectable slot on the draft board.
///
/// `original_owner_team_id` is fixed at board generation; only
/// `current_owner_team_id` moves, and only through trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPick {
    pub id: Uuid,
    pub league_id: Uuid,
    pub season: i32,
    pub round: i32,
    pub pick_in_round: i32,
    pub overall_pick: i32,
    pub original_owner_team_id: Uuid,
    pub current_owner_team_id: Uuid,
    pub selected_player_id: Option<Uuid>,
    pub selected_at: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

impl DraftPick {
    pub fn new(
        league_id: Uuid,
        season: i32,
        round: i32,
        pick_in_round: i32,
        overall_pick: i32,
        owner_team_id: Uuid,
    ) -> DomainResult<Self> {
        if round < 1 || pick_in_round < 1 || overall_pick < 1 {
            return Err(DomainError::ValidationError(
                "Pick coordinates must be positive".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            season,
            round,
            pick_in_round,
            overall_pick,
            original_owner_team_id: owner_team_id,
            current_owner_team_id: owner_team_id,
            selected_player_id: None,
            selected_at: None,
            is_complete: false,
        })
    }

    /// A future-season pick materialized by a trade. It has no board
    /// coordinates within the current season; `pick_in_round` and
    /// `overall_pick` stay 0 until that season's board is generated.
    pub fn future(
        league_id: Uuid,
        season: i32,
        round: i32,
        original_owner_team_id: Uuid,
        current_owner_team_id: Uuid,
    ) -> DomainResult<Self> {
        if round < 1 {
            return Err(DomainError::ValidationError(
                "Future pick round must be positive".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            league_id,
            season,
            round,
            pick_in_round: 0,
            overall_pick: 0,
            original_owner_team_id,
            current_owner_team_id,
            selected_player_id: None,
            selected_at: None,
            is_complete: false,
        })
    }

    /// Record the selection. Keeps `is_complete`, `selected_player_id` and
    /// `selected_at` in lockstep.
    pub fn select(&mut self, player_id: Uuid) -> DomainResult<()> {
        if self.is_complete {
            return Err(DomainError::InvalidState(format!(
                "Pick {} is already complete",
                self.overall_pick
            )));
        }

        self.selected_player_id = Some(player_id);
        self.selected_at = Some(Utc::now());
        self.is_complete = true;
        Ok(())
    }

    /// Reverse a selection (commissioner undo or draft reset).
    pub fn clear_selection(&mut self) {
        self.selected_player_id = None;
        self.selected_at = None;
        self.is_complete = false;
    }
}

/// Generate the full board for one season from the ordered team list.
///
/// Round order is the team list as given for LINEAR drafts and for odd snake
/// rounds; even snake rounds reverse it.
pub fn build_board(
    league_id: Uuid,
    season: i32,
    draft_type: DraftType,
    total_rounds: i32,
    teams_in_order: &[Uuid],
) -> DomainResult<Vec<DraftPick>> {
    if teams_in_order.is_empty() {
        return Err(DomainError::ValidationError(
            "Cannot generate a draft board with no teams".to_string(),
        ));
    }

    let n = teams_in_order.len() as i32;
    let mut picks = Vec::with_capacity((n * total_rounds) as usize);

    for round in 1..=total_rounds {
        let reversed = draft_type == DraftType::Snake && round % 2 == 0;

        for k in 1..=n {
            let seat = if reversed { n - k } else { k - 1 };
            let owner = teams_in_order[seat as usize];
            let overall = (round - 1) * n + k;
            picks.push(DraftPick::new(league_id, season, round, k, overall, owner)?);
        }
    }

    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn teams(n: usize) -> Vec<Uuid> {
        (0..n).map(|i| Uuid::from_u128(i as u128 + 1)).collect()
    }

    #[test]
    fn test_select_and_clear() {
        let mut pick =
            DraftPick::new(Uuid::new_v4(), 2026, 1, 1, 1, Uuid::new_v4()).unwrap();
        let player_id = Uuid::new_v4();

        pick.select(player_id).unwrap();
        assert!(pick.is_complete);
        assert_eq!(pick.selected_player_id, Some(player_id));
        assert!(pick.selected_at.is_some());

        // Double selection is rejected
        assert!(matches!(
            pick.select(Uuid::new_v4()),
            Err(DomainError::InvalidState(_))
        ));

        pick.clear_selection();
        assert!(!pick.is_complete);
        assert!(pick.selected_player_id.is_none());
        assert!(pick.selected_at.is_none());
    }

    #[test]
    fn test_linear_board_repeats_order() {
        let league_id = Uuid::new_v4();
        let t = teams(3);
        let picks = build_board(league_id, 2026, DraftType::Linear, 2, &t).unwrap();

        let owners: Vec<Uuid> = picks.iter().map(|p| p.current_owner_team_id).collect();
        assert_eq!(owners, vec![t[0], t[1], t[2], t[0], t[1], t[2]]);
    }

    #[test]
    fn test_snake_board_reverses_even_rounds() {
        let league_id = Uuid::new_v4();
        let t = teams(3);
        let picks = build_board(league_id, 2026, DraftType::Snake, 3, &t).unwrap();

        let owners: Vec<Uuid> = picks.iter().map(|p| p.current_owner_team_id).collect();
        assert_eq!(
            owners,
            vec![t[0], t[1], t[2], t[2], t[1], t[0], t[0], t[1], t[2]]
        );
    }

    #[test]
    fn test_board_is_bijective_onto_overall_range() {
        for draft_type in [DraftType::Snake, DraftType::Linear] {
            for n in [2usize, 4, 10] {
                let rounds = 15;
                let t = teams(n);
                let picks =
                    build_board(Uuid::new_v4(), 2026, draft_type, rounds, &t).unwrap();

                assert_eq!(picks.len(), n * rounds as usize);

                let overalls: HashSet<i32> =
                    picks.iter().map(|p| p.overall_pick).collect();
                assert_eq!(overalls.len(), picks.len());
                assert_eq!(*overalls.iter().min().unwrap(), 1);
                assert_eq!(*overalls.iter().max().unwrap(), n as i32 * rounds);

                let coords: HashSet<(i32, i32)> =
                    picks.iter().map(|p| (p.round, p.pick_in_round)).collect();
                assert_eq!(coords.len(), picks.len());

                for p in &picks {
                    assert_eq!(
                        p.overall_pick,
                        (p.round - 1) * n as i32 + p.pick_in_round
                    );
                    assert_eq!(p.original_owner_team_id, p.current_owner_team_id);
                }
            }
        }
    }

    #[test]
    fn test_board_rejects_empty_teams() {
        let result = build_board(Uuid::new_v4(), 2026, DraftType::Linear, 2, &[]);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }
}
