use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::LeagueSettings;
use domain::repositories::LeagueRepository;

use crate::errors::DbError;
use crate::models::LeagueRow;

const LEAGUE_COLUMNS: &str = "id, name, season, max_teams, commissioner_user_id, \
     roster_starters, roster_bench, draft_type, total_rounds, timer_seconds, \
     reserve_seconds, pause_on_trade, max_keepers, scheduled_start, keeper_deadline";

/// SQLx implementation of LeagueRepository.
pub struct SqlxLeagueRepository {
    pool: PgPool,
}

impl SqlxLeagueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeagueRepository for SqlxLeagueRepository {
    async fn get(&self, league_id: Uuid) -> DomainResult<Option<LeagueSettings>> {
        let query = format!("SELECT {} FROM leagues WHERE id = $1", LEAGUE_COLUMNS);
        let row = sqlx::query_as::<_, LeagueRow>(&query)
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        match row {
            Some(row) => Ok(Some(row.to_domain()?)),
            None => Ok(None),
        }
    }
}
