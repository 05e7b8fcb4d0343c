//! Adapters for external dependencies.

pub mod lookups_sea;
