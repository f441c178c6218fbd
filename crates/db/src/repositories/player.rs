use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::Player;
use domain::repositories::PlayerRepository;

use crate::errors::DbError;
use crate::models::PlayerRow;

const PLAYER_COLUMNS: &str =
    "id, name, position, nfl_team, rank, adp, bye_week, injury_status, active";

/// SQLx implementation of PlayerRepository.
pub struct SqlxPlayerRepository {
    pool: PgPool,
}

impl SqlxPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for SqlxPlayerRepository {
    async fn get(&self, player_id: Uuid) -> DomainResult<Option<Player>> {
        let query = format!("SELECT {} FROM players WHERE id = $1", PLAYER_COLUMNS);
        let row = sqlx::query_as::<_, PlayerRow>(&query)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        match row {
            Some(row) => Ok(Some(row.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn list_available(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<Player>> {
        // Roster rows double as the availability index: drafted players and
        // keepers both occupy one.
        let query = format!(
            "SELECT {} FROM players p \
             WHERE p.active = TRUE \
               AND NOT EXISTS (\
                   SELECT 1 FROM roster_entries r \
                   WHERE r.league_id = $1 AND r.player_id = p.id) \
             ORDER BY p.rank ASC NULLS LAST, p.id ASC \
             LIMIT $2",
            PLAYER_COLUMNS
        );
        let rows = sqlx::query_as::<_, PlayerRow>(&query)
            .bind(league_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|r| r.to_domain().map_err(Into::into))
            .collect()
    }
}
