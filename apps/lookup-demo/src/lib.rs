#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod demo;
pub mod entities;
pub mod error;
pub mod repos;
pub mod run;

// Re-exports for public API
pub use config::{AppConfig, DemoOptions};
pub use demo::{run_demo, DemoReport};
pub use error::AppError;
pub use repos::lookups::Lookup;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    demo_test_support::logging::init();
}
