pub mod coordinator;
pub mod draft_clock;
pub mod registry;
pub mod snapshot;
pub mod trade_engine;

pub use coordinator::{LeagueCoordinator, PAUSE_REASON_POOL_EMPTY, PAUSE_REASON_TRADE};
pub use draft_clock::{ClockDriver, ClockObserver, ClockState, PickClock, PERSIST_EVERY_TICKS};
pub use registry::CoordinatorRegistry;
pub use snapshot::{SnapshotBuilder, AVAILABLE_PLAYERS_CAP};
pub use trade_engine::TradeEngine;
