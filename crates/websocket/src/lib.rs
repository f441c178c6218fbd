//! Subscription hub for live draft rooms: wire messages, per-league rooms
//! with ordered fan-out, and the intent authorization gate.

pub mod hub;
pub mod manager;
pub mod messages;

pub use hub::{DraftSession, SubscriptionHub};
pub use manager::{RoomManager, SessionSender};
pub use messages::{ClientMessage, ServerMessage};
