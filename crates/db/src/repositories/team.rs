use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::Team;
use domain::repositories::TeamRepository;

use crate::errors::DbError;
use crate::models::TeamRow;

/// SQLx implementation of TeamRepository.
pub struct SqlxTeamRepository {
    pool: PgPool,
}

impl SqlxTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for SqlxTeamRepository {
    async fn get(&self, team_id: Uuid) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT id, league_id, name, owner_user_id, draft_position \
             FROM teams WHERE id = $1",
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT id, league_id, name, owner_user_id, draft_position \
             FROM teams WHERE league_id = $1 ORDER BY draft_position ASC",
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn update_draft_positions(
        &self,
        league_id: Uuid,
        ordered_team_ids: &[Uuid],
    ) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        for (index, team_id) in ordered_team_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE teams SET draft_position = $1 WHERE id = $2 AND league_id = $3",
            )
            .bind(index as i32 + 1)
            .bind(team_id)
            .bind(league_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        }

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(())
    }
}
