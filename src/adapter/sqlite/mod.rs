//! SQLite persistence for the post lookup table.

pub mod connection;
mod model;
mod schema;
mod store;

pub use connection::{create_pool, run_migrations, DbPool};
pub use store::SqlitePostStore;
