//! Scratch SQLite databases for integration tests.
//!
//! Each [`ScratchDb`] lives in its own temporary directory holding the
//! database file and a `schemas/` migration directory. Everything is removed
//! when the value is dropped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// SQLite flavour of the `lookups` schema shipped in `schemas/`.
pub const LOOKUPS_UP_SQL: &str = r#"CREATE TABLE lookups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    table_name TEXT NOT NULL,
    display_order INTEGER NOT NULL DEFAULT 0,
    display_text TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    internal_key TEXT NOT NULL,
    concurrency_key TEXT NOT NULL,
    create_date TEXT NOT NULL,
    create_user_id INTEGER NOT NULL,
    value_text TEXT NOT NULL,
    update_date TEXT NULL,
    update_user_id INTEGER NULL
);

CREATE INDEX idx_lookups_display_text ON lookups (display_text);
"#;

pub const LOOKUPS_DOWN_SQL: &str = r#"DROP INDEX IF EXISTS idx_lookups_display_text;
DROP TABLE IF EXISTS lookups;
"#;

pub struct ScratchDb {
    dir: TempDir,
    db_path: PathBuf,
    migrations_dir: PathBuf,
}

impl ScratchDb {
    /// Empty database file location and an empty migration directory.
    pub fn empty() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("lookups.db");
        let migrations_dir = dir.path().join("schemas");
        fs::create_dir_all(&migrations_dir)?;
        Ok(Self {
            dir,
            db_path,
            migrations_dir,
        })
    }

    /// Scratch database whose migration directory holds the `lookups` schema.
    pub fn with_lookups_schema() -> io::Result<Self> {
        let scratch = Self::empty()?;
        scratch.write_migration(1, "create_lookups", LOOKUPS_UP_SQL, Some(LOOKUPS_DOWN_SQL))?;
        Ok(scratch)
    }

    /// Add a migration. Without `down` the migration is forward-only.
    pub fn write_migration(
        &self,
        version: i64,
        description: &str,
        up: &str,
        down: Option<&str>,
    ) -> io::Result<()> {
        match down {
            Some(down) => {
                let stem = format!("{version:06}_{description}");
                fs::write(self.migrations_dir.join(format!("{stem}.up.sql")), up)?;
                fs::write(self.migrations_dir.join(format!("{stem}.down.sql")), down)?;
            }
            None => {
                let name = format!("{version:06}_{description}.sql");
                fs::write(self.migrations_dir.join(name), up)?;
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// `DB_NAME` value for this database.
    pub fn db_name(&self) -> String {
        self.db_path.to_string_lossy().into_owned()
    }

    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// Dotenv text pointing the demo at this database.
    pub fn env_file_contents(&self) -> String {
        format!(
            "DRIVER_NAME=sqlite\nDB_NAME={}\nMIGRATIONS_DIR={}\n",
            self.db_name(),
            self.migrations_dir.display()
        )
    }
}
