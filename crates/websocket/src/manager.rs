use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use domain::events::{EventSink, ServerEvent};

/// Outbound queue for one session. The transport layer drains it into the
/// actual socket; a closed receiver marks the session dead.
pub type SessionSender = mpsc::UnboundedSender<String>;

/// Per-league rooms of connected sessions.
///
/// Events are serialized once per broadcast and pushed onto each session's
/// queue in room order; the unbounded queues preserve per-subscriber
/// ordering, which is what the protocol's delivery guarantee rests on.
#[derive(Clone, Default)]
pub struct RoomManager {
    sessions: Arc<DashMap<Uuid, SessionSender>>,
    rooms: Arc<DashMap<Uuid, Vec<Uuid>>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session in a league room.
    pub fn add_session(&self, session_id: Uuid, league_id: Uuid, sender: SessionSender) {
        info!(
            session_id = %session_id,
            league_id = %league_id,
            "Session joined draft room"
        );

        self.sessions.insert(session_id, sender);
        let mut room = self.rooms.entry(league_id).or_default();
        if !room.contains(&session_id) {
            room.push(session_id);
        }
    }

    /// Drop a session from every room.
    pub fn remove_session(&self, session_id: Uuid) {
        info!(session_id = %session_id, "Session left");

        self.sessions.remove(&session_id);
        self.rooms.iter_mut().for_each(|mut entry| {
            entry.value_mut().retain(|id| *id != session_id);
        });
        self.rooms.retain(|_, members| !members.is_empty());
    }

    pub fn room_size(&self, league_id: Uuid) -> usize {
        self.rooms.get(&league_id).map(|r| r.len()).unwrap_or(0)
    }

    pub fn total_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn encode(event: &ServerEvent) -> Option<String> {
        match serde_json::to_string(event) {
            Ok(json) => Some(json),
            Err(e) => {
                error!(error = %e, "Failed to serialize server event");
                None
            }
        }
    }
}

#[async_trait]
impl EventSink for RoomManager {
    async fn broadcast(&self, league_id: Uuid, event: ServerEvent) {
        let Some(json) = Self::encode(&event) else {
            return;
        };

        let members = match self.rooms.get(&league_id) {
            Some(members) => members.clone(),
            None => {
                debug!(league_id = %league_id, "Broadcast with empty room");
                return;
            }
        };

        let mut dead = Vec::new();
        for session_id in &members {
            match self.sessions.get(session_id) {
                Some(sender) => {
                    if sender.send(json.clone()).is_err() {
                        warn!(session_id = %session_id, "Session queue closed; pruning");
                        dead.push(*session_id);
                    }
                }
                None => dead.push(*session_id),
            }
        }

        for session_id in dead {
            self.remove_session(session_id);
        }
    }

    async fn unicast(&self, session_id: Uuid, event: ServerEvent) {
        let Some(json) = Self::encode(&event) else {
            return;
        };

        if let Some(sender) = self.sessions.get(&session_id) {
            if sender.send(json).is_err() {
                warn!(session_id = %session_id, "Session queue closed; pruning");
                drop(sender);
                self.remove_session(session_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(league_id: Uuid) -> ServerEvent {
        ServerEvent::DraftStarted {
            league_id,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_broadcast_reaches_room_members_only() {
        let manager = RoomManager::new();
        let league_a = Uuid::new_v4();
        let league_b = Uuid::new_v4();

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        manager.add_session(Uuid::new_v4(), league_a, tx1);
        manager.add_session(Uuid::new_v4(), league_b, tx2);

        manager.broadcast(league_a, event(league_a)).await;

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_order_is_preserved_per_session() {
        let manager = RoomManager::new();
        let league_id = Uuid::new_v4();

        let (tx, mut rx) = mpsc::unbounded_channel();
        manager.add_session(Uuid::new_v4(), league_id, tx);

        for seconds in [3, 2, 1] {
            manager
                .broadcast(
                    league_id,
                    ServerEvent::TimerTick {
                        league_id,
                        seconds_remaining: seconds,
                        current_pick: 1,
                        current_team_id: None,
                    },
                )
                .await;
        }

        for expected in [3, 2, 1] {
            let json = rx.try_recv().unwrap();
            assert!(json.contains(&format!("\"secondsRemaining\":{}", expected)));
        }
    }

    #[tokio::test]
    async fn test_closed_session_is_pruned_on_broadcast() {
        let manager = RoomManager::new();
        let league_id = Uuid::new_v4();

        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        manager.add_session(Uuid::new_v4(), league_id, tx);
        assert_eq!(manager.room_size(league_id), 1);

        manager.broadcast(league_id, event(league_id)).await;

        assert_eq!(manager.room_size(league_id), 0);
        assert_eq!(manager.total_sessions(), 0);
    }

    #[tokio::test]
    async fn test_remove_session_empties_room() {
        let manager = RoomManager::new();
        let league_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();

        let (tx, _rx) = mpsc::unbounded_channel();
        manager.add_session(session_id, league_id, tx);
        manager.remove_session(session_id);

        assert_eq!(manager.room_size(league_id), 0);
        assert_eq!(manager.total_sessions(), 0);
    }

    #[tokio::test]
    async fn test_unicast_targets_one_session() {
        let manager = RoomManager::new();
        let league_id = Uuid::new_v4();
        let target = Uuid::new_v4();

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        manager.add_session(target, league_id, tx1);
        manager.add_session(Uuid::new_v4(), league_id, tx2);

        manager
            .unicast(target, ServerEvent::error(None, "NOT_YOUR_TURN", "wait".to_string()))
            .await;

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());
    }
}
