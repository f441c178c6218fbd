use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Player;

use crate::errors::{DbError, DbResult};

/// Database model for the players catalog table.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerRow {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub nfl_team: Option<String>,
    pub rank: Option<i32>,
    pub adp: Option<f64>,
    pub bye_week: Option<i32>,
    pub injury_status: Option<String>,
    pub active: bool,
}

impl PlayerRow {
    pub fn to_domain(&self) -> DbResult<Player> {
        Ok(Player {
            id: self.id,
            name: self.name.clone(),
            position: self
                .position
                .parse()
                .map_err(|e: domain::DomainError| DbError::MappingError(e.to_string()))?,
            nfl_team: self.nfl_team.clone(),
            rank: self.rank,
            adp: self.adp,
            bye_week: self.bye_week,
            injury_status: self.injury_status.clone(),
            active: self.active,
        })
    }
}
