pub mod activity;
pub mod draft;
pub mod league;
pub mod player;
pub mod queue;
pub mod roster;
pub mod team;
pub mod trade;

pub use activity::SqlxActivityRepository;
pub use draft::{SqlxDraftStateRepository, SqlxPickRepository};
pub use league::SqlxLeagueRepository;
pub use player::SqlxPlayerRepository;
pub use queue::SqlxQueueRepository;
pub use roster::SqlxRosterRepository;
pub use team::SqlxTeamRepository;
pub use trade::SqlxTradeRepository;

use std::sync::Arc;

use domain::repositories::Gateway;
use sqlx::PgPool;

/// Assemble the full persistence gateway over one connection pool.
pub fn sqlx_gateway(pool: PgPool) -> Gateway {
    Gateway {
        leagues: Arc::new(SqlxLeagueRepository::new(pool.clone())),
        draft_states: Arc::new(SqlxDraftStateRepository::new(pool.clone())),
        teams: Arc::new(SqlxTeamRepository::new(pool.clone())),
        players: Arc::new(SqlxPlayerRepository::new(pool.clone())),
        picks: Arc::new(SqlxPickRepository::new(pool.clone())),
        rosters: Arc::new(SqlxRosterRepository::new(pool.clone())),
        trades: Arc::new(SqlxTradeRepository::new(pool.clone())),
        queues: Arc::new(SqlxQueueRepository::new(pool.clone())),
        activity: Arc::new(SqlxActivityRepository::new(pool)),
    }
}
