pub mod activity;
pub mod draft;
pub mod league;
pub mod player;
pub mod queue;
pub mod roster;
pub mod team;
pub mod trade;

pub use activity::ActivityRow;
pub use draft::{DraftStateRow, PickRow};
pub use league::LeagueRow;
pub use player::PlayerRow;
pub use queue::QueueRow;
pub use roster::RosterRow;
pub use team::TeamRow;
pub use trade::{TradeAssetRow, TradeRow};
