use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::ActivityEntry;
use domain::repositories::ActivityRepository;

use crate::errors::DbError;
use crate::models::ActivityRow;

/// SQLx implementation of ActivityRepository.
pub struct SqlxActivityRepository {
    pool: PgPool,
}

impl SqlxActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for SqlxActivityRepository {
    async fn append(&self, entry: &ActivityEntry) -> DomainResult<()> {
        let row = ActivityRow::from_domain(entry);
        sqlx::query(
            "INSERT INTO activity_log (id, league_id, kind, data, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(row.id)
        .bind(row.league_id)
        .bind(&row.kind)
        .bind(&row.data)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn list(&self, league_id: Uuid, limit: usize) -> DomainResult<Vec<ActivityEntry>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            "SELECT id, league_id, kind, data, created_at \
             FROM activity_log WHERE league_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
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
