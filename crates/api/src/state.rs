use std::sync::Arc;

use sqlx::PgPool;

use db::MemoryStore;
use domain::auth::AuthProvider;
use domain::repositories::Gateway;
use domain::services::CoordinatorRegistry;
use websocket::{RoomManager, SubscriptionHub};

use crate::auth::TokenAuthProvider;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub rooms: Arc<RoomManager>,
    pub registry: Arc<CoordinatorRegistry>,
    pub hub: Arc<SubscriptionHub>,
    pub auth: Arc<dyn AuthProvider>,
    /// `None` when running over the in-memory store.
    pool: Option<PgPool>,
}

impl AppState {
    /// Wire the full stack over a Postgres pool.
    pub fn from_pool(pool: PgPool, session_token_key: Option<String>) -> Self {
        Self::assemble(db::sqlx_gateway(pool.clone()), Some(pool), session_token_key)
    }

    /// Wire the full stack over the in-memory store (demo mode, tests).
    pub fn in_memory(store: &MemoryStore, session_token_key: Option<String>) -> Self {
        Self::assemble(store.gateway(), None, session_token_key)
    }

    /// The backing connection pool, for health probes. Prefer the gateway
    /// for data access.
    pub fn db_pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    fn assemble(
        gateway: Gateway,
        pool: Option<PgPool>,
        session_token_key: Option<String>,
    ) -> Self {
        let rooms = Arc::new(RoomManager::new());
        let registry = Arc::new(CoordinatorRegistry::new(gateway.clone(), rooms.clone()));
        let auth: Arc<dyn AuthProvider> = Arc::new(TokenAuthProvider::new(
            gateway.clone(),
            session_token_key,
        ));
        let hub = Arc::new(SubscriptionHub::new(
            rooms.clone(),
            registry.clone(),
            gateway.clone(),
            auth.clone(),
        ));

        Self {
            gateway,
            rooms,
            registry,
            hub,
            auth,
            pool,
        }
    }
}
