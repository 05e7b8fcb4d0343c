//! Typed application configuration, built once from the environment.

use std::path::PathBuf;

use db_infra::config::db::DbConfig;
use db_infra::config::env::BundledEnvSource;
use db_infra::config::paths::DEFAULT_MIGRATIONS_DIR;

use crate::error::AppError;

/// Defaults compiled into the binary; see `conf/app.env`.
pub const BUNDLED_ENV: BundledEnvSource =
    BundledEnvSource::new("conf/app.env", include_str!("../conf/app.env"));

pub const DEFAULT_DISPLAY_TEXT: &str = "GoLang";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOptions {
    /// Deactivate the inserted row before reading it back.
    pub update_lookup: bool,
    /// Display text of the inserted row and filter of the select.
    pub display_text: String,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            update_lookup: true,
            display_text: DEFAULT_DISPLAY_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    pub migrations_dir: PathBuf,
    pub demo: DemoOptions,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = DbConfig::from_vars(&lookup)?;
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let migrations_dir = var("MIGRATIONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MIGRATIONS_DIR));

        let update_lookup = match var("DEMO_UPDATE_LOOKUP") {
            Some(raw) => parse_bool("DEMO_UPDATE_LOOKUP", &raw)?,
            None => true,
        };
        let display_text = var("DEMO_DISPLAY_TEXT")
            .unwrap_or_else(|| DEFAULT_DISPLAY_TEXT.to_string());

        Ok(Self {
            db,
            migrations_dir,
            demo: DemoOptions {
                update_lookup,
                display_text,
            },
        })
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "{name} must be a boolean (true/false), got '{raw}'"
        ))),
    }
}
