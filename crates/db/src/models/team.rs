use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Team;

/// Database model for the teams table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamRow {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub owner_user_id: Option<Uuid>,
    pub draft_position: i32,
}

impl TeamRow {
    pub fn to_domain(&self) -> Team {
        Team {
            id: self.id,
            league_id: self.league_id,
            name: self.name.clone(),
            owner_user_id: self.owner_user_id,
            draft_position: self.draft_position,
        }
    }
}
