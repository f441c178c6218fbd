pub mod activity;
pub mod draft_state;
pub mod league;
pub mod pick;
pub mod player;
pub mod queue;
pub mod roster;
pub mod team;
pub mod trade;

pub use activity::{ActivityEntry, ActivityKind};
pub use draft_state::{DraftState, DraftStatus};
pub use league::{DraftType, LeagueSettings, RosterSettings};
pub use pick::{build_board, DraftPick};
pub use player::{Player, Position};
pub use queue::TeamQueue;
pub use roster::{AcquisitionKind, RosterEntry};
pub use team::Team;
pub use trade::{
    AssetRef, ProposedAsset, Trade, TradeAsset, TradeStatus, DEFAULT_TRADE_TTL_HOURS,
};
