use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::TeamQueue;

/// Database model for the team_queues table. `player_ids` is a uuid[]
/// column; order is the queue order.
#[derive(Debug, Clone, FromRow)]
pub struct QueueRow {
    pub league_id: Uuid,
    pub team_id: Uuid,
    pub player_ids: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl QueueRow {
    pub fn from_domain(queue: &TeamQueue) -> Self {
        Self {
            league_id: queue.league_id,
            team_id: queue.team_id,
            player_ids: queue.player_ids.clone(),
            updated_at: queue.updated_at,
        }
    }

    pub fn to_domain(&self) -> TeamQueue {
        TeamQueue {
            league_id: self.league_id,
            team_id: self.team_id,
            player_ids: self.player_ids.clone(),
            updated_at: self.updated_at,
        }
    }
}
