use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::RosterEntry;
use domain::repositories::RosterRepository;

use crate::errors::DbError;
use crate::models::RosterRow;

const ROSTER_COLUMNS: &str =
    "id, league_id, team_id, player_id, is_keeper, keeper_round, acquired_via, acquired_at";

/// SQLx implementation of RosterRepository.
pub struct SqlxRosterRepository {
    pool: PgPool,
}

impl SqlxRosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterRepository for SqlxRosterRepository {
    async fn list(&self, league_id: Uuid) -> DomainResult<Vec<RosterEntry>> {
        let query = format!(
            "SELECT {} FROM roster_entries WHERE league_id = $1 ORDER BY acquired_at ASC",
            ROSTER_COLUMNS
        );
        let rows = sqlx::query_as::<_, RosterRow>(&query)
            .bind(league_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|r| r.to_domain().map_err(Into::into))
            .collect()
    }

    async fn list_by_team(
        &self,
        league_id: Uuid,
        team_id: Uuid,
    ) -> DomainResult<Vec<RosterEntry>> {
        let query = format!(
            "SELECT {} FROM roster_entries \
             WHERE league_id = $1 AND team_id = $2 ORDER BY acquired_at ASC",
            ROSTER_COLUMNS
        );
        let rows = sqlx::query_as::<_, RosterRow>(&query)
            .bind(league_id)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|r| r.to_domain().map_err(Into::into))
            .collect()
    }

    async fn get_by_player(
        &self,
        league_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<Option<RosterEntry>> {
        let query = format!(
            "SELECT {} FROM roster_entries WHERE league_id = $1 AND player_id = $2",
            ROSTER_COLUMNS
        );
        let row = sqlx::query_as::<_, RosterRow>(&query)
            .bind(league_id)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        match row {
            Some(row) => Ok(Some(row.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn create(&self, entry: &RosterEntry) -> DomainResult<RosterEntry> {
        let row = RosterRow::from_domain(entry);
        let result = sqlx::query(
            "INSERT INTO roster_entries (id, league_id, team_id, player_id, is_keeper, \
                 keeper_round, acquired_via, acquired_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (league_id, player_id) DO NOTHING",
        )
        .bind(row.id)
        .bind(row.league_id)
        .bind(row.team_id)
        .bind(row.player_id)
        .bind(row.is_keeper)
        .bind(row.keeper_round)
        .bind(&row.acquired_via)
        .bind(row.acquired_at)
        .execute(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(DbError::DuplicateEntry(format!(
                "Player {} is already rostered in league {}",
                entry.player_id, entry.league_id
            ))
            .into());
        }

        Ok(entry.clone())
    }
}
