//! Core draft coordination for keeper-style fantasy leagues: the per-league
//! state machine, pick clock, trade engine, snapshot builder and the
//! persistence gateway contracts they run against.

pub mod auth;
pub mod errors;
pub mod events;
pub mod models;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::{DomainError, DomainResult};
