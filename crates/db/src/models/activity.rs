use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ActivityEntry;

use crate::errors::{DbError, DbResult};

/// Database model for the activity_log table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub league_id: Uuid,
    pub kind: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ActivityRow {
    pub fn from_domain(entry: &ActivityEntry) -> Self {
        Self {
            id: entry.id,
            league_id: entry.league_id,
            kind: entry.kind.to_string(),
            data: entry.data.clone(),
            created_at: entry.created_at,
        }
    }

    pub fn to_domain(&self) -> DbResult<ActivityEntry> {
        Ok(ActivityEntry {
            id: self.id,
            league_id: self.league_id,
            kind: self
                .kind
                .parse()
                .map_err(|e: domain::DomainError| DbError::MappingError(e.to_string()))?,
            data: self.data.clone(),
            created_at: self.created_at,
        })
    }
}
