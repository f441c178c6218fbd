use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use domain::auth::SessionIdentity;
use domain::events::ServerEvent;
use websocket::{ClientMessage, DraftSession};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    token: String,
}

/// WebSocket upgrade endpoint. The session authenticates via the `token`
/// query parameter before the upgrade; room membership is negotiated over
/// the socket with `JoinDraftRoom` / `LeaveDraftRoom`.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let identity = match state.auth.identify(&query.token).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!(error = %e, "WebSocket auth rejected");
            return (StatusCode::UNAUTHORIZED, "invalid session token").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, identity))
}

async fn handle_socket(socket: WebSocket, state: AppState, identity: SessionIdentity) {
    let session_id = Uuid::new_v4();
    info!(session_id = %session_id, user_id = %identity.user_id, "WebSocket connected");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();

    // Outbound pump: drain the session queue into the socket.
    let writer = tokio::spawn(async move {
        while let Some(json) = out_rx.recv().await {
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut session: Option<DraftSession> = None;

    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let parsed = match ClientMessage::from_json(&text) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        debug!(session_id = %session_id, error = %e, "Unparseable message");
                        let _ = out_tx.send(error_json(
                            "VALIDATION_FAILED",
                            &format!("Invalid message format: {}", e),
                        ));
                        continue;
                    }
                };

                match parsed {
                    ClientMessage::JoinDraftRoom { league_id, team_id } => {
                        if let Some(existing) = session.take() {
                            if existing.league_id == league_id {
                                // Idempotent join: answer with a fresh snapshot.
                                if let Err(e) = state.hub.resync(&existing).await {
                                    let _ = out_tx.send(error_json(e.code(), &e.to_string()));
                                }
                                session = Some(existing);
                                continue;
                            }
                            state.hub.leave(&existing).await;
                        }

                        match state
                            .hub
                            .join(session_id, identity, league_id, team_id, out_tx.clone())
                            .await
                        {
                            Ok(joined) => session = Some(joined),
                            Err(e) => {
                                warn!(session_id = %session_id, error = %e, "Join refused");
                                let _ = out_tx.send(error_json(e.code(), &e.to_string()));
                            }
                        }
                    }
                    ClientMessage::LeaveDraftRoom { .. } => {
                        if let Some(existing) = session.take() {
                            state.hub.leave(&existing).await;
                        }
                    }
                    ClientMessage::Ping if session.is_none() => {
                        if let Ok(json) = serde_json::to_string(&ServerEvent::Pong) {
                            let _ = out_tx.send(json);
                        }
                    }
                    intent => match &session {
                        Some(joined) => state.hub.publish_intent(joined, intent).await,
                        None => {
                            let _ = out_tx.send(error_json(
                                "INVALID_STATE",
                                "Join a draft room before sending intents",
                            ));
                        }
                    },
                }
            }
            Ok(Message::Close(_)) => {
                info!(session_id = %session_id, "WebSocket client disconnected");
                break;
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                // Protocol-level keep-alives are handled by axum
            }
            Ok(Message::Binary(_)) => {
                warn!(session_id = %session_id, "Binary frames are not supported");
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    if let Some(joined) = session.take() {
        state.hub.leave(&joined).await;
    }
    writer.abort();
    info!(session_id = %session_id, "WebSocket connection closed");
}

fn error_json(code: &str, message: &str) -> String {
    serde_json::to_string(&ServerEvent::error(None, code, message.to_string()))
        .unwrap_or_else(|_| format!("{{\"event\":\"Error\",\"code\":\"{}\"}}", code))
}
