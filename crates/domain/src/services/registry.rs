use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::events::EventSink;
use crate::repositories::Gateway;
use crate::services::coordinator::LeagueCoordinator;

/// Process-wide map of league coordinators. Coordinators are created lazily
/// on first acquire and torn down once nobody is subscribed and no clock is
/// running; everything they need lives in the store, so eviction is
/// invisible to clients.
pub struct CoordinatorRegistry {
    coordinators: DashMap<Uuid, Arc<LeagueCoordinator>>,
    gateway: Gateway,
    sink: Arc<dyn EventSink>,
}

impl CoordinatorRegistry {
    pub fn new(gateway: Gateway, sink: Arc<dyn EventSink>) -> Self {
        Self {
            coordinators: DashMap::new(),
            gateway,
            sink,
        }
    }

    /// The league's singleton coordinator. Concurrent acquires resolve to
    /// the same instance.
    pub fn acquire(&self, league_id: Uuid) -> Arc<LeagueCoordinator> {
        self.coordinators
            .entry(league_id)
            .or_insert_with(|| {
                debug!(league_id = %league_id, "Creating league coordinator");
                LeagueCoordinator::new(league_id, self.gateway.clone(), self.sink.clone())
            })
            .clone()
    }

    /// Drop one subscriber; evict the coordinator if it ends up idle with a
    /// stopped clock.
    pub async fn release(&self, league_id: Uuid) {
        let coordinator = match self.coordinators.get(&league_id) {
            Some(entry) => entry.clone(),
            None => return,
        };

        let remaining = coordinator.remove_subscriber();
        if remaining == 0 && !coordinator.clock_is_live().await {
            coordinator.shutdown();
            self.coordinators.remove(&league_id);
            info!(league_id = %league_id, "League coordinator evicted");
        }
    }

    pub fn active_leagues(&self) -> usize {
        self.coordinators.len()
    }
}
