pub mod activity;
pub mod draft_state;
pub mod league;
pub mod pick;
pub mod player;
pub mod queue;
pub mod roster;
pub mod team;
pub mod trade;

pub use activity::ActivityRepository;
pub use draft_state::DraftStateRepository;
pub use league::LeagueRepository;
pub use pick::{PickRepository, SelectionCommit, SelectionUndo};
pub use player::PlayerRepository;
pub use queue::QueueRepository;
pub use roster::RosterRepository;
pub use team::TeamRepository;
pub use trade::{TradeRepository, TradeSwapOutcome};

use std::sync::Arc;

/// The persistence gateway: one handle bundling every repository. The
/// gateway is the only component that touches the store; coordinators hold
/// a clone and materialize rows on demand.
#[derive(Clone)]
pub struct Gateway {
    pub leagues: Arc<dyn LeagueRepository>,
    pub draft_states: Arc<dyn DraftStateRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub picks: Arc<dyn PickRepository>,
    pub rosters: Arc<dyn RosterRepository>,
    pub trades: Arc<dyn TradeRepository>,
    pub queues: Arc<dyn QueueRepository>,
    pub activity: Arc<dyn ActivityRepository>,
}
