//! Repository layer over the SeaORM adapters.

pub mod lookups;
