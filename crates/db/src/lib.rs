//! Persistence gateway implementations: a PostgreSQL gateway over sqlx and
//! a fully in-memory gateway for tests and database-free demo runs.

pub mod errors;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

pub use errors::{DbError, DbResult};
pub use memory::MemoryStore;
pub use pool::create_pool;
pub use repositories::sqlx_gateway;
