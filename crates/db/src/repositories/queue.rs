use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::TeamQueue;
use domain::repositories::QueueRepository;

use crate::errors::DbError;
use crate::models::QueueRow;

/// SQLx implementation of QueueRepository.
pub struct SqlxQueueRepository {
    pool: PgPool,
}

impl SqlxQueueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for SqlxQueueRepository {
    async fn get(&self, league_id: Uuid, team_id: Uuid) -> DomainResult<Option<TeamQueue>> {
        let row = sqlx::query_as::<_, QueueRow>(
            "SELECT league_id, team_id, player_ids, updated_at \
             FROM team_queues WHERE league_id = $1 AND team_id = $2",
        )
        .bind(league_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<TeamQueue>> {
        let rows = sqlx::query_as::<_, QueueRow>(
            "SELECT league_id, team_id, player_ids, updated_at \
             FROM team_queues WHERE league_id = $1",
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn upsert(&self, queue: &TeamQueue) -> DomainResult<()> {
        let row = QueueRow::from_domain(queue);
        sqlx::query(
            "INSERT INTO team_queues (league_id, team_id, player_ids, updated_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (league_id, team_id) DO UPDATE SET \
                 player_ids = EXCLUDED.player_ids, updated_at = EXCLUDED.updated_at",
        )
        .bind(row.league_id)
        .bind(row.team_id)
        .bind(&row.player_ids)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(())
    }
}
