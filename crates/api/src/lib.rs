pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::TokenAuthProvider;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
