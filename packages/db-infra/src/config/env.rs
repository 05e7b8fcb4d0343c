//! Dotenv-style configuration sources and the overlay that merges them
//! under the process environment.
//!
//! The process environment always wins: a key that is already set is left
//! untouched, and only keys missing from the process are exported from the
//! source. Downstream crates that read the environment directly (sqlx,
//! tracing filters) see the merged view.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::DbInfraError;

/// Names a dotenv file on disk that replaces the bundled defaults.
pub const ENV_FILE_VAR: &str = "ENV_FILE";

/// A source of `KEY=value` pairs.
pub trait EnvSource {
    /// Human readable origin, used in logs and error messages.
    fn describe(&self) -> String;

    /// Parse the source. Pairs are returned in file order.
    fn read(&self) -> Result<Vec<(String, String)>, DbInfraError>;
}

/// Dotenv file read from the filesystem at startup.
#[derive(Debug, Clone)]
pub struct FileEnvSource {
    path: PathBuf,
}

impl FileEnvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EnvSource for FileEnvSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn read(&self) -> Result<Vec<(String, String)>, DbInfraError> {
        let iter = dotenvy::from_path_iter(&self.path).map_err(|e| {
            DbInfraError::config(format!(
                "failed to open env file '{}': {e}",
                self.path.display()
            ))
        })?;
        collect_pairs(iter, &self.describe())
    }
}

/// Dotenv content compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct BundledEnvSource {
    name: &'static str,
    contents: &'static str,
}

impl BundledEnvSource {
    pub const fn new(name: &'static str, contents: &'static str) -> Self {
        Self { name, contents }
    }
}

impl EnvSource for BundledEnvSource {
    fn describe(&self) -> String {
        format!("bundled:{}", self.name)
    }

    fn read(&self) -> Result<Vec<(String, String)>, DbInfraError> {
        let iter = dotenvy::from_read_iter(self.contents.as_bytes());
        collect_pairs(iter, &self.describe())
    }
}

fn collect_pairs<I>(iter: I, origin: &str) -> Result<Vec<(String, String)>, DbInfraError>
where
    I: Iterator<Item = dotenvy::Result<(String, String)>>,
{
    iter.map(|item| {
        item.map_err(|e| DbInfraError::config(format!("failed to parse env source {origin}: {e}")))
    })
    .collect()
}

/// Picks the file named by `ENV_FILE` when it is set, the bundled defaults otherwise.
pub fn select_env_source(bundled: BundledEnvSource) -> Box<dyn EnvSource> {
    select_env_source_from(std::env::var_os(ENV_FILE_VAR), bundled)
}

fn select_env_source_from(
    env_file: Option<OsString>,
    bundled: BundledEnvSource,
) -> Box<dyn EnvSource> {
    match env_file {
        Some(path) if !path.is_empty() => Box::new(FileEnvSource::new(path)),
        _ => Box::new(bundled),
    }
}

/// Result of layering a source under the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    merged: BTreeMap<String, String>,
    injected: Vec<String>,
    shadowed: Vec<String>,
}

impl EnvOverlay {
    /// Full merged view: process keys plus injected keys.
    pub fn merged(&self) -> &BTreeMap<String, String> {
        &self.merged
    }

    /// Keys that came from the source only, sorted.
    pub fn injected(&self) -> &[String] {
        &self.injected
    }

    /// Source keys ignored because the process already defined them, sorted.
    pub fn shadowed(&self) -> &[String] {
        &self.shadowed
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.merged.get(key).map(String::as_str)
    }
}

/// Merge source pairs under the process environment.
///
/// Process values are never replaced. When the source repeats a key the
/// first occurrence wins.
pub fn merge_env<I>(file_vars: I, process_vars: &BTreeMap<String, String>) -> EnvOverlay
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut merged = process_vars.clone();
    let mut injected = Vec::new();
    let mut shadowed = Vec::new();

    for (key, value) in file_vars {
        if process_vars.contains_key(&key) {
            if !shadowed.contains(&key) {
                shadowed.push(key);
            }
            continue;
        }
        if merged.contains_key(&key) {
            continue;
        }
        merged.insert(key.clone(), value);
        injected.push(key);
    }

    injected.sort();
    shadowed.sort();

    EnvOverlay {
        merged,
        injected,
        shadowed,
    }
}

/// Read `source`, merge it under the current process environment and export
/// the injected keys.
pub fn apply_env_source(source: &dyn EnvSource) -> Result<EnvOverlay, DbInfraError> {
    let origin = source.describe();
    let file_vars = source.read()?;
    let overlay = merge_env(file_vars, &process_env_snapshot());

    for key in overlay.injected() {
        let value = overlay.get(key).unwrap_or_default();
        if key.is_empty() || key.contains('=') || key.contains('\0') || value.contains('\0') {
            return Err(DbInfraError::config(format!(
                "env source {origin} contains an unusable entry for key '{key}'"
            )));
        }
    }

    for key in overlay.injected() {
        std::env::set_var(key, overlay.get(key).unwrap_or_default());
        debug!(key = %key, "env key injected");
    }

    info!(
        source = %origin,
        injected = overlay.injected().len(),
        shadowed = overlay.shadowed().len(),
        "env overlay applied"
    );

    Ok(overlay)
}

fn process_env_snapshot() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            Some((key, value.to_string_lossy().into_owned()))
        })
        .collect()
}
