//! Test support utilities
//!
//! Unified logging initialization plus scratch SQLite databases with a
//! migration directory for the `lookups` schema.

pub mod logging;
pub mod scratch;

pub use scratch::ScratchDb;
