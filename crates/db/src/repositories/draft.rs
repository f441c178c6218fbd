use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::{DraftPick, DraftState};
use domain::repositories::{
    DraftStateRepository, PickRepository, SelectionCommit, SelectionUndo,
};

use crate::errors::DbError;
use crate::models::{DraftStateRow, PickRow, RosterRow};

const PICK_COLUMNS: &str = "id, league_id, season, round, pick_in_round, overall_pick, \
     original_owner_team_id, current_owner_team_id, selected_player_id, selected_at, \
     is_complete";

const STATE_COLUMNS: &str = "league_id, status, current_round, current_pick, \
     current_team_id, is_paused, pause_reason, timer_seconds_remaining, \
     timer_started_at, last_pick_id, undo_available, started_at, completed_at, \
     last_activity_at";

/// Upsert the singleton draft-state row inside an open transaction.
pub(crate) async fn upsert_state(
    conn: &mut PgConnection,
    row: &DraftStateRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO draft_states (league_id, status, current_round, current_pick, \
             current_team_id, is_paused, pause_reason, timer_seconds_remaining, \
             timer_started_at, last_pick_id, undo_available, started_at, completed_at, \
             last_activity_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         ON CONFLICT (league_id) DO UPDATE SET \
             status = EXCLUDED.status, \
             current_round = EXCLUDED.current_round, \
             current_pick = EXCLUDED.current_pick, \
             current_team_id = EXCLUDED.current_team_id, \
             is_paused = EXCLUDED.is_paused, \
             pause_reason = EXCLUDED.pause_reason, \
             timer_seconds_remaining = EXCLUDED.timer_seconds_remaining, \
             timer_started_at = EXCLUDED.timer_started_at, \
             last_pick_id = EXCLUDED.last_pick_id, \
             undo_available = EXCLUDED.undo_available, \
             started_at = EXCLUDED.started_at, \
             completed_at = EXCLUDED.completed_at, \
             last_activity_at = EXCLUDED.last_activity_at",
    )
    .bind(row.league_id)
    .bind(&row.status)
    .bind(row.current_round)
    .bind(row.current_pick)
    .bind(row.current_team_id)
    .bind(row.is_paused)
    .bind(&row.pause_reason)
    .bind(row.timer_seconds_remaining)
    .bind(row.timer_started_at)
    .bind(row.last_pick_id)
    .bind(row.undo_available)
    .bind(row.started_at)
    .bind(row.completed_at)
    .bind(row.last_activity_at)
    .execute(conn)
    .await?;
    Ok(())
}

async fn insert_pick(conn: &mut PgConnection, row: &PickRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO draft_picks (id, league_id, season, round, pick_in_round, \
             overall_pick, original_owner_team_id, current_owner_team_id, \
             selected_player_id, selected_at, is_complete) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(row.id)
    .bind(row.league_id)
    .bind(row.season)
    .bind(row.round)
    .bind(row.pick_in_round)
    .bind(row.overall_pick)
    .bind(row.original_owner_team_id)
    .bind(row.current_owner_team_id)
    .bind(row.selected_player_id)
    .bind(row.selected_at)
    .bind(row.is_complete)
    .execute(conn)
    .await?;
    Ok(())
}

/// SQLx implementation of DraftStateRepository.
pub struct SqlxDraftStateRepository {
    pool: PgPool,
}

impl SqlxDraftStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftStateRepository for SqlxDraftStateRepository {
    async fn get(&self, league_id: Uuid) -> DomainResult<Option<DraftState>> {
        let query = format!(
            "SELECT {} FROM draft_states WHERE league_id = $1",
            STATE_COLUMNS
        );
        let row = sqlx::query_as::<_, DraftStateRow>(&query)
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        match row {
            Some(row) => Ok(Some(row.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, state: &DraftState) -> DomainResult<()> {
        let row = DraftStateRow::from_domain(state);
        let mut conn = self.pool.acquire().await.map_err(DbError::DatabaseError)?;
        upsert_state(&mut conn, &row)
            .await
            .map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn reset_league(&self, league_id: Uuid, season: i32) -> DomainResult<DraftState> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        sqlx::query("DELETE FROM draft_picks WHERE league_id = $1 AND season > $2")
            .bind(league_id)
            .bind(season)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;

        sqlx::query(
            "UPDATE draft_picks SET \
                 current_owner_team_id = original_owner_team_id, \
                 selected_player_id = NULL, selected_at = NULL, is_complete = FALSE \
             WHERE league_id = $1 AND season = $2",
        )
        .bind(league_id)
        .bind(season)
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        sqlx::query("DELETE FROM roster_entries WHERE league_id = $1 AND is_keeper = FALSE")
            .bind(league_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;

        sqlx::query(
            "UPDATE trades SET status = 'CANCELLED', responded_at = $2 \
             WHERE league_id = $1 AND status = 'PENDING'",
        )
        .bind(league_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        let fresh = DraftState::initial(league_id);
        upsert_state(&mut tx, &DraftStateRow::from_domain(&fresh))
            .await
            .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(fresh)
    }
}

/// SQLx implementation of PickRepository.
pub struct SqlxPickRepository {
    pool: PgPool,
}

impl SqlxPickRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PickRepository for SqlxPickRepository {
    async fn get(&self, pick_id: Uuid) -> DomainResult<Option<DraftPick>> {
        let query = format!("SELECT {} FROM draft_picks WHERE id = $1", PICK_COLUMNS);
        let row = sqlx::query_as::<_, PickRow>(&query)
            .bind(pick_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn get_by_overall(
        &self,
        league_id: Uuid,
        season: i32,
        overall_pick: i32,
    ) -> DomainResult<Option<DraftPick>> {
        let query = format!(
            "SELECT {} FROM draft_picks \
             WHERE league_id = $1 AND season = $2 AND overall_pick = $3",
            PICK_COLUMNS
        );
        let row = sqlx::query_as::<_, PickRow>(&query)
            .bind(league_id)
            .bind(season)
            .bind(overall_pick)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn list_season(&self, league_id: Uuid, season: i32) -> DomainResult<Vec<DraftPick>> {
        let query = format!(
            "SELECT {} FROM draft_picks \
             WHERE league_id = $1 AND season = $2 ORDER BY overall_pick ASC",
            PICK_COLUMNS
        );
        let rows = sqlx::query_as::<_, PickRow>(&query)
            .bind(league_id)
            .bind(season)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_future(
        &self,
        league_id: Uuid,
        season: i32,
        round: i32,
        original_owner_team_id: Uuid,
    ) -> DomainResult<Option<DraftPick>> {
        let query = format!(
            "SELECT {} FROM draft_picks \
             WHERE league_id = $1 AND season = $2 AND round = $3 \
               AND original_owner_team_id = $4",
            PICK_COLUMNS
        );
        let row = sqlx::query_as::<_, PickRow>(&query)
            .bind(league_id)
            .bind(season)
            .bind(round)
            .bind(original_owner_team_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        Ok(row.map(|r| r.to_domain()))
    }

    async fn replace_board(
        &self,
        league_id: Uuid,
        season: i32,
        picks: &[DraftPick],
    ) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        sqlx::query("DELETE FROM draft_picks WHERE league_id = $1 AND season = $2")
            .bind(league_id)
            .bind(season)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;

        for pick in picks {
            insert_pick(&mut tx, &PickRow::from_domain(pick))
                .await
                .map_err(DbError::DatabaseError)?;
        }

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn commit_selection(&self, commit: &SelectionCommit) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        // Row locks guard against a concurrent writer double-drafting the
        // player or re-completing the pick.
        let locked: Option<(bool,)> = sqlx::query_as(
            "SELECT is_complete FROM draft_picks WHERE id = $1 FOR UPDATE",
        )
        .bind(commit.pick.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        match locked {
            None => {
                return Err(DbError::NotFound(format!(
                    "Pick {} does not exist",
                    commit.pick.id
                ))
                .into())
            }
            Some((true,)) => {
                return Err(DbError::StaleRow(format!(
                    "Pick {} is already complete",
                    commit.pick.overall_pick
                ))
                .into())
            }
            Some((false,)) => {}
        }

        let taken: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM roster_entries \
             WHERE league_id = $1 AND player_id = $2 FOR UPDATE",
        )
        .bind(commit.roster_entry.league_id)
        .bind(commit.roster_entry.player_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        if taken.is_some() {
            return Err(DbError::StaleRow(format!(
                "Player {} is already rostered",
                commit.roster_entry.player_id
            ))
            .into());
        }

        sqlx::query(
            "UPDATE draft_picks \
             SET selected_player_id = $2, selected_at = $3, is_complete = TRUE \
             WHERE id = $1",
        )
        .bind(commit.pick.id)
        .bind(commit.pick.selected_player_id)
        .bind(commit.pick.selected_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        let roster = RosterRow::from_domain(&commit.roster_entry);
        sqlx::query(
            "INSERT INTO roster_entries (id, league_id, team_id, player_id, is_keeper, \
                 keeper_round, acquired_via, acquired_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(roster.id)
        .bind(roster.league_id)
        .bind(roster.team_id)
        .bind(roster.player_id)
        .bind(roster.is_keeper)
        .bind(roster.keeper_round)
        .bind(&roster.acquired_via)
        .bind(roster.acquired_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        upsert_state(&mut tx, &DraftStateRow::from_domain(&commit.state))
            .await
            .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn undo_selection(&self, undo: &SelectionUndo) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        sqlx::query(
            "UPDATE draft_picks \
             SET selected_player_id = NULL, selected_at = NULL, is_complete = FALSE \
             WHERE id = $1",
        )
        .bind(undo.pick.id)
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        sqlx::query(
            "DELETE FROM roster_entries \
             WHERE league_id = $1 AND team_id = $2 AND player_id = $3",
        )
        .bind(undo.pick.league_id)
        .bind(undo.team_id)
        .bind(undo.player_id)
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        upsert_state(&mut tx, &DraftStateRow::from_domain(&undo.state))
            .await
            .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(())
    }
}
