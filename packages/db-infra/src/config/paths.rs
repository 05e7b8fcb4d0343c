//! Migration directory resolution.
//!
//! The migration source is carried around as a `file:///` URI so the same
//! string can be logged and handed to tooling that expects that scheme.

use std::path::{Path, PathBuf};

use crate::error::DbInfraError;

pub const FILE_SCHEME: &str = "file:///";
pub const DEFAULT_MIGRATIONS_DIR: &str = "schemas";

/// Resolve `relative` against the current directory, require that it exists,
/// and return its canonical form.
pub fn resolve_absolute(relative: impl AsRef<Path>) -> Result<PathBuf, DbInfraError> {
    let relative = relative.as_ref();
    let absolute = std::path::absolute(relative).map_err(|e| {
        DbInfraError::migration_source(format!(
            "failed to resolve absolute path for '{}': {e}",
            relative.display()
        ))
    })?;

    match absolute.try_exists() {
        Ok(true) => {}
        Ok(false) => {
            return Err(DbInfraError::migration_source(format!(
                "'{}' does not exist",
                absolute.display()
            )))
        }
        Err(e) => {
            return Err(DbInfraError::migration_source(format!(
                "cannot access '{}': {e}",
                absolute.display()
            )))
        }
    }

    // Resolves `.`, `..` and symlinks.
    absolute.canonicalize().map_err(|e| {
        DbInfraError::migration_source(format!(
            "cannot canonicalize '{}': {e}",
            absolute.display()
        ))
    })
}

/// Prefix `path` with `file:///` unless it already carries the scheme.
pub fn ensure_file_scheme(path: &str) -> String {
    if path.starts_with(FILE_SCHEME) {
        return path.to_string();
    }
    let rest = path.strip_prefix('/').unwrap_or(path);
    format!("{FILE_SCHEME}{rest}")
}

/// Inverse of [`ensure_file_scheme`] for absolute paths.
pub fn strip_file_scheme(uri: &str) -> PathBuf {
    match uri.strip_prefix(FILE_SCHEME) {
        Some(rest) if cfg!(windows) => PathBuf::from(rest),
        Some(rest) => PathBuf::from(format!("/{rest}")),
        None => PathBuf::from(uri),
    }
}

/// An existing migration directory, addressed by its `file:///` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSource {
    uri: String,
}

impl MigrationSource {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn path(&self) -> PathBuf {
        strip_file_scheme(&self.uri)
    }
}

/// Resolve a migration directory into a [`MigrationSource`].
///
/// Existence is checked before the scheme is added; a missing or non-directory
/// target is an error.
pub fn resolve_migration_source(dir: impl AsRef<Path>) -> Result<MigrationSource, DbInfraError> {
    let absolute = resolve_absolute(dir)?;
    if !absolute.is_dir() {
        return Err(DbInfraError::migration_source(format!(
            "'{}' is not a directory",
            absolute.display()
        )));
    }

    let as_str = absolute.to_str().ok_or_else(|| {
        DbInfraError::migration_source(format!(
            "'{}' is not valid UTF-8",
            absolute.display()
        ))
    })?;

    Ok(MigrationSource {
        uri: ensure_file_scheme(as_str),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_prefix_absolute_unix_path() {
        assert_eq!(ensure_file_scheme("/srv/app/schemas"), "file:///srv/app/schemas");
    }

    #[test]
    fn test_prefix_is_not_doubled() {
        assert_eq!(
            ensure_file_scheme("file:///srv/app/schemas"),
            "file:///srv/app/schemas"
        );
    }

    #[test]
    fn test_strip_restores_absolute_path() {
        if cfg!(windows) {
            return;
        }
        assert_eq!(
            strip_file_scheme("file:///srv/app/schemas"),
            PathBuf::from("/srv/app/schemas")
        );
        assert_eq!(strip_file_scheme("/plain"), PathBuf::from("/plain"));
    }

    #[test]
    fn test_resolve_existing_directory() {
        let dir = tempfile::tempdir().unwrap();

        let source = resolve_migration_source(dir.path()).unwrap();

        assert!(source.uri().starts_with(FILE_SCHEME));
        assert_eq!(source.path(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_collapses_parent_segments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        let winding = dir.path().join("a").join("..").join("a").join(".");

        let source = resolve_migration_source(&winding).unwrap();

        assert!(!source.uri().contains(".."), "uri: {}", source.uri());
        assert!(!source.uri().contains("/./"), "uri: {}", source.uri());
        assert_eq!(source.path(), dir.path().join("a").canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = resolve_migration_source(&missing).unwrap_err();

        assert!(matches!(err, DbInfraError::MigrationSource { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_file_is_not_a_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let err = resolve_migration_source(file.path()).unwrap_err();

        assert!(err.to_string().contains("not a directory"));
    }

    proptest! {
        #[test]
        fn prop_prefix_is_idempotent(path in "(file:///)?/?[a-zA-Z0-9_./-]{0,24}") {
            let once = ensure_file_scheme(&path);
            let twice = ensure_file_scheme(&once);
            prop_assert!(once.starts_with(FILE_SCHEME));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_missing_directory_never_yields_uri(name in "[a-z]{1,12}") {
            let dir = tempfile::tempdir().unwrap();
            let missing = dir.path().join(format!("missing-{name}"));
            let result = resolve_absolute(&missing);
            let is_source_error = matches!(result, Err(DbInfraError::MigrationSource { .. }));
            prop_assert!(is_source_error, "unexpected result: {:?}", result);
        }
    }
}
