use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Advisory wish list a team owner maintains during the draft. The core
/// never reads it for decisions; it only stores, reorders and fans it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamQueue {
    pub league_id: Uuid,
    pub team_id: Uuid,
    pub player_ids: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl TeamQueue {
    pub fn new(league_id: Uuid, team_id: Uuid, player_ids: Vec<Uuid>) -> Self {
        Self {
            league_id,
            team_id,
            player_ids,
            updated_at: Utc::now(),
        }
    }

    pub fn replace(&mut self, player_ids: Vec<Uuid>) {
        self.player_ids = player_ids;
        self.updated_at = Utc::now();
    }
}
