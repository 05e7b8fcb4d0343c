//! Shared database configuration and migration infrastructure.
//! Used by the lookup demo binary and its tests.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db;
pub use error::DbInfraError;
pub use infra::db::core::{connect_app, sanitize_db_url};
pub use infra::db::migrator::{MigrationOutcome, MigrationRunner};
