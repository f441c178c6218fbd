use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use domain::models::ActivityEntry;
use domain::repositories::ActivityRepository;

use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    limit: Option<usize>,
}

/// The league's decision journal, newest first. Lets a reconnecting client
/// render history beyond what the live event stream carried.
pub async fn activity(
    State(state): State<AppState>,
    Path(league_id): Path<Uuid>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<Vec<ActivityEntry>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let entries = state.gateway.activity.list(league_id, limit).await?;
    Ok(Json(entries))
}
