pub mod core;
pub mod migrator;

pub use core::{connect_app, sanitize_db_url};
pub use migrator::{MigrationOutcome, MigrationRunner};
