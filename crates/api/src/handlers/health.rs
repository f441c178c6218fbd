use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Liveness probe: service status plus a live database round-trip. The
/// hub's session count rides along for operators.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.db_pool() {
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool).await {
            Ok(_) => "ok",
            Err(e) => {
                tracing::error!(error = %e, "Database health probe failed");
                "unreachable"
            }
        },
        // Demo mode runs without Postgres; the store is process-local.
        None => "memory",
    };

    let degraded = database == "unreachable";
    let status_code = if degraded {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(json!({
            "status": if degraded { "degraded" } else { "ok" },
            "database": database,
            "activeSessions": state.rooms.total_sessions(),
            "activeLeagues": state.registry.active_leagues(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::MemoryStore;

    #[tokio::test]
    async fn test_health_in_memory_mode() {
        let store = MemoryStore::new();
        let state = AppState::in_memory(&store, None);

        let response = health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
