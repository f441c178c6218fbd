use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::{AssetRef, DraftPick, RosterEntry, Trade, TradeAsset, TradeStatus};
use domain::repositories::{TradeRepository, TradeSwapOutcome};

use crate::errors::DbError;
use crate::models::{PickRow, RosterRow, TradeAssetRow, TradeRow};

const TRADE_COLUMNS: &str = "id, league_id, initiator_team_id, receiver_team_id, status, \
     proposed_at, responded_at, processed_at, expires_at, forced_by_commissioner, \
     commissioner_notes";

const ASSET_COLUMNS: &str = "id, trade_id, from_team_id, asset_kind, draft_pick_id, \
     player_id, future_pick_season, future_pick_round";

const PICK_COLUMNS: &str = "id, league_id, season, round, pick_in_round, overall_pick, \
     original_owner_team_id, current_owner_team_id, selected_player_id, selected_at, \
     is_complete";

/// SQLx implementation of TradeRepository.
pub struct SqlxTradeRepository {
    pool: PgPool,
}

impl SqlxTradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_assets(
        &self,
        conn: &mut PgConnection,
        trade_id: Uuid,
    ) -> Result<Vec<TradeAssetRow>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM trade_assets WHERE trade_id = $1 ORDER BY id ASC",
            ASSET_COLUMNS
        );
        sqlx::query_as::<_, TradeAssetRow>(&query)
            .bind(trade_id)
            .fetch_all(conn)
            .await
    }

    /// Move one asset from its stated owner to the counterparty, verifying
    /// ownership under a row lock first.
    async fn swap_asset(
        tx: &mut PgConnection,
        trade: &Trade,
        asset: &TradeAsset,
        current_season: i32,
        updated_picks: &mut Vec<DraftPick>,
        moved_entries: &mut Vec<RosterEntry>,
    ) -> Result<(), DbError> {
        let to_team = if asset.from_team_id == trade.initiator_team_id {
            trade.receiver_team_id
        } else {
            trade.initiator_team_id
        };

        match &asset.asset {
            AssetRef::DraftPick { pick_id } => {
                let query = format!(
                    "SELECT {} FROM draft_picks WHERE id = $1 FOR UPDATE",
                    PICK_COLUMNS
                );
                let row = sqlx::query_as::<_, PickRow>(&query)
                    .bind(pick_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        DbError::StaleRow(format!("Traded pick {} no longer exists", pick_id))
                    })?;

                if row.is_complete {
                    return Err(DbError::StaleRow(format!(
                        "Pick {} has already been used",
                        row.overall_pick
                    )));
                }
                if row.current_owner_team_id != asset.from_team_id {
                    return Err(DbError::StaleRow(format!(
                        "Pick {} is no longer owned by the giving team",
                        row.overall_pick
                    )));
                }

                sqlx::query("UPDATE draft_picks SET current_owner_team_id = $2 WHERE id = $1")
                    .bind(pick_id)
                    .bind(to_team)
                    .execute(&mut *tx)
                    .await?;

                let mut pick = row.to_domain();
                pick.current_owner_team_id = to_team;
                updated_picks.push(pick);
            }
            AssetRef::Player { player_id } => {
                let query = format!(
                    "SELECT {} FROM roster_entries \
                     WHERE league_id = $1 AND player_id = $2 FOR UPDATE",
                    "id, league_id, team_id, player_id, is_keeper, keeper_round, \
                     acquired_via, acquired_at"
                );
                let row = sqlx::query_as::<_, RosterRow>(&query)
                    .bind(trade.league_id)
                    .bind(player_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        DbError::StaleRow(format!(
                            "Player {} is no longer rostered in this league",
                            player_id
                        ))
                    })?;

                if row.team_id != asset.from_team_id {
                    return Err(DbError::StaleRow(format!(
                        "Player {} is no longer on the giving team",
                        player_id
                    )));
                }

                let now = Utc::now();
                sqlx::query(
                    "UPDATE roster_entries \
                     SET team_id = $2, acquired_via = 'TRADED', acquired_at = $3 \
                     WHERE id = $1",
                )
                .bind(row.id)
                .bind(to_team)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                let entry = row.to_domain()?;
                moved_entries.push(entry.traded_to(to_team));
            }
            AssetRef::FuturePick { season, round } => {
                if *season <= current_season {
                    return Err(DbError::StaleRow(format!(
                        "Future pick season {} is not in the future",
                        season
                    )));
                }

                let query = format!(
                    "SELECT {} FROM draft_picks \
                     WHERE league_id = $1 AND season = $2 AND round = $3 \
                       AND original_owner_team_id = $4 FOR UPDATE",
                    PICK_COLUMNS
                );
                let existing = sqlx::query_as::<_, PickRow>(&query)
                    .bind(trade.league_id)
                    .bind(season)
                    .bind(round)
                    .bind(asset.from_team_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                match existing {
                    Some(row) => {
                        if row.is_complete || row.current_owner_team_id != asset.from_team_id {
                            return Err(DbError::StaleRow(format!(
                                "Future pick {} round {} is no longer tradeable",
                                season, round
                            )));
                        }

                        sqlx::query(
                            "UPDATE draft_picks SET current_owner_team_id = $2 WHERE id = $1",
                        )
                        .bind(row.id)
                        .bind(to_team)
                        .execute(&mut *tx)
                        .await?;

                        let mut pick = row.to_domain();
                        pick.current_owner_team_id = to_team;
                        updated_picks.push(pick);
                    }
                    None => {
                        // First trade of a virtual future pick materializes it.
                        let pick = DraftPick::future(
                            trade.league_id,
                            *season,
                            *round,
                            asset.from_team_id,
                            to_team,
                        )
                        .map_err(|e| DbError::MappingError(e.to_string()))?;

                        let row = PickRow::from_domain(&pick);
                        sqlx::query(
                            "INSERT INTO draft_picks (id, league_id, season, round, \
                                 pick_in_round, overall_pick, original_owner_team_id, \
                                 current_owner_team_id, selected_player_id, selected_at, \
                                 is_complete) \
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
                        .execute(&mut *tx)
                        .await?;

                        updated_picks.push(pick);
                    }
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl TradeRepository for SqlxTradeRepository {
    async fn create(&self, trade: &Trade, assets: &[TradeAsset]) -> DomainResult<()> {
        let trade_row = TradeRow::from_domain(trade);
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        sqlx::query(
            "INSERT INTO trades (id, league_id, initiator_team_id, receiver_team_id, \
                 status, proposed_at, responded_at, processed_at, expires_at, \
                 forced_by_commissioner, commissioner_notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(trade_row.id)
        .bind(trade_row.league_id)
        .bind(trade_row.initiator_team_id)
        .bind(trade_row.receiver_team_id)
        .bind(&trade_row.status)
        .bind(trade_row.proposed_at)
        .bind(trade_row.responded_at)
        .bind(trade_row.processed_at)
        .bind(trade_row.expires_at)
        .bind(trade_row.forced_by_commissioner)
        .bind(&trade_row.commissioner_notes)
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        for asset in assets {
            let row = TradeAssetRow::from_domain(asset);
            sqlx::query(
                "INSERT INTO trade_assets (id, trade_id, from_team_id, asset_kind, \
                     draft_pick_id, player_id, future_pick_season, future_pick_round) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(row.id)
            .bind(row.trade_id)
            .bind(row.from_team_id)
            .bind(&row.asset_kind)
            .bind(row.draft_pick_id)
            .bind(row.player_id)
            .bind(row.future_pick_season)
            .bind(row.future_pick_round)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;
        }

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn get_with_assets(
        &self,
        trade_id: Uuid,
    ) -> DomainResult<Option<(Trade, Vec<TradeAsset>)>> {
        let query = format!("SELECT {} FROM trades WHERE id = $1", TRADE_COLUMNS);
        let row = sqlx::query_as::<_, TradeRow>(&query)
            .bind(trade_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut conn = self.pool.acquire().await.map_err(DbError::DatabaseError)?;
        let assets = self
            .load_assets(&mut conn, trade_id)
            .await
            .map_err(DbError::DatabaseError)?;

        let trade = row.to_domain()?;
        let assets = assets
            .into_iter()
            .map(|a| a.to_domain())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some((trade, assets)))
    }

    async fn list_pending(
        &self,
        league_id: Uuid,
    ) -> DomainResult<Vec<(Trade, Vec<TradeAsset>)>> {
        let query = format!(
            "SELECT {} FROM trades \
             WHERE league_id = $1 AND status = 'PENDING' ORDER BY proposed_at ASC",
            TRADE_COLUMNS
        );
        let rows = sqlx::query_as::<_, TradeRow>(&query)
            .bind(league_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        let mut conn = self.pool.acquire().await.map_err(DbError::DatabaseError)?;
        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let assets = self
                .load_assets(&mut conn, row.id)
                .await
                .map_err(DbError::DatabaseError)?;
            let trade = row.to_domain()?;
            let assets = assets
                .into_iter()
                .map(|a| a.to_domain())
                .collect::<Result<Vec<_>, _>>()?;
            result.push((trade, assets));
        }

        Ok(result)
    }

    async fn update(&self, trade: &Trade) -> DomainResult<()> {
        let row = TradeRow::from_domain(trade);
        sqlx::query(
            "UPDATE trades SET status = $2, responded_at = $3, processed_at = $4, \
                 forced_by_commissioner = $5, commissioner_notes = $6 \
             WHERE id = $1",
        )
        .bind(row.id)
        .bind(&row.status)
        .bind(row.responded_at)
        .bind(row.processed_at)
        .bind(row.forced_by_commissioner)
        .bind(&row.commissioner_notes)
        .execute(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;
        Ok(())
    }

    async fn execute_swap(
        &self,
        trade_id: Uuid,
        current_season: i32,
        forced_by_commissioner: bool,
    ) -> DomainResult<TradeSwapOutcome> {
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        let query = format!("SELECT {} FROM trades WHERE id = $1 FOR UPDATE", TRADE_COLUMNS);
        let row = sqlx::query_as::<_, TradeRow>(&query)
            .bind(trade_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?
            .ok_or_else(|| DbError::NotFound(format!("Trade {} not found", trade_id)))?;

        let mut trade = row.to_domain()?;
        if trade.status != TradeStatus::Pending {
            return Err(DbError::StaleRow(format!(
                "Trade {} is no longer pending",
                trade_id
            ))
            .into());
        }

        let asset_rows = self
            .load_assets(&mut tx, trade_id)
            .await
            .map_err(DbError::DatabaseError)?;
        let assets = asset_rows
            .into_iter()
            .map(|a| a.to_domain())
            .collect::<Result<Vec<_>, _>>()?;

        let mut updated_picks = Vec::new();
        let mut moved_entries = Vec::new();
        for asset in &assets {
            Self::swap_asset(
                &mut tx,
                &trade,
                asset,
                current_season,
                &mut updated_picks,
                &mut moved_entries,
            )
            .await?;
        }

        trade.begin_processing()?;
        trade.complete(forced_by_commissioner)?;

        let row = TradeRow::from_domain(&trade);
        sqlx::query(
            "UPDATE trades SET status = $2, responded_at = $3, processed_at = $4, \
                 forced_by_commissioner = $5 \
             WHERE id = $1",
        )
        .bind(row.id)
        .bind(&row.status)
        .bind(row.responded_at)
        .bind(row.processed_at)
        .bind(row.forced_by_commissioner)
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(TradeSwapOutcome {
            trade,
            assets,
            updated_picks,
            moved_entries,
        })
    }
}
