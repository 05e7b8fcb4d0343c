//! Directory-based schema migrations.
//!
//! Migrations are `<version>_<description>.up.sql` / `.down.sql` pairs read
//! at runtime from a [`MigrationSource`]. The runner owns a dedicated
//! connection that is separate from the application connection.

use sqlx::migrate::{Migrate, MigrateError, Migrator};
use sqlx::{Connection, PgConnection, SqliteConnection};
use tracing::{info, warn};

use crate::config::db::{DbConfig, DbKind};
use crate::config::paths::MigrationSource;
use crate::error::DbInfraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Every defined migration was already applied.
    NoChange,
    Applied { count: usize },
}

enum MigrationConn {
    Postgres(PgConnection),
    Sqlite(SqliteConnection),
}

impl MigrationConn {
    async fn open(config: &DbConfig) -> Result<Self, sqlx::Error> {
        let url = config.database_url();
        match config.kind {
            DbKind::Postgres => Ok(Self::Postgres(PgConnection::connect(&url).await?)),
            DbKind::SqliteFile => Ok(Self::Sqlite(SqliteConnection::connect(&url).await?)),
        }
    }

    async fn applied_versions(&mut self) -> Result<Vec<i64>, MigrateError> {
        let applied = match self {
            Self::Postgres(conn) => {
                conn.ensure_migrations_table().await?;
                conn.list_applied_migrations().await?
            }
            Self::Sqlite(conn) => {
                conn.ensure_migrations_table().await?;
                conn.list_applied_migrations().await?
            }
        };
        Ok(applied.into_iter().map(|m| m.version).collect())
    }

    async fn run(&mut self, migrator: &Migrator) -> Result<(), MigrateError> {
        match self {
            Self::Postgres(conn) => migrator.run(conn).await,
            Self::Sqlite(conn) => migrator.run(conn).await,
        }
    }

    async fn undo(&mut self, migrator: &Migrator, target: i64) -> Result<(), MigrateError> {
        match self {
            Self::Postgres(conn) => migrator.undo(conn, target).await,
            Self::Sqlite(conn) => migrator.undo(conn, target).await,
        }
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(conn) => conn.close().await,
            Self::Sqlite(conn) => conn.close().await,
        }
    }
}

/// Applies and reverts the migrations of one source over one connection.
pub struct MigrationRunner {
    migrator: Migrator,
    conn: MigrationConn,
    source: MigrationSource,
}

impl MigrationRunner {
    /// Load the migration directory, then open the migration connection.
    pub async fn open(config: &DbConfig, source: &MigrationSource) -> Result<Self, DbInfraError> {
        info!(source = %source.uri(), "loading migrations");
        let migrator = Migrator::new(source.path()).await.map_err(|e| {
            DbInfraError::migration(format!(
                "failed to load migrations from {}: {e}",
                source.uri()
            ))
        })?;

        info!(
            engine = config.kind.engine(),
            dsn = %config.redacted_dsn(),
            defined = migrator.iter().filter(|m| !m.migration_type.is_down_migration()).count(),
            "opening migration connection"
        );
        let conn = MigrationConn::open(config).await.map_err(|e| {
            DbInfraError::connection(format!("failed to open migration connection: {e}"))
        })?;

        Ok(Self {
            migrator,
            conn,
            source: source.clone(),
        })
    }

    /// Number of forward migrations found in the source.
    pub fn defined_count(&self) -> usize {
        self.migrator
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .count()
    }

    /// Versions recorded as applied, oldest first.
    pub async fn applied_versions(&mut self) -> Result<Vec<i64>, DbInfraError> {
        let mut versions = self.conn.applied_versions().await.map_err(|e| {
            DbInfraError::migration(format!("failed to list applied migrations: {e}"))
        })?;
        versions.sort_unstable();
        Ok(versions)
    }

    /// Forward migrations not applied yet.
    pub async fn pending(&mut self) -> Result<usize, DbInfraError> {
        let applied = self.applied_versions().await?;
        Ok(self.pending_versions(&applied).len())
    }

    fn pending_versions(&self, applied: &[i64]) -> Vec<i64> {
        self.migrator
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .map(|m| m.version)
            .filter(|version| !applied.contains(version))
            .collect()
    }

    /// Apply every pending migration.
    pub async fn up(&mut self) -> Result<MigrationOutcome, DbInfraError> {
        let applied = self.applied_versions().await?;
        let pending = self.pending_versions(&applied);

        info!(
            defined = self.defined_count(),
            applied = applied.len(),
            pending = pending.len(),
            "migrate=start direction=up"
        );

        if pending.is_empty() {
            info!("no pending migrations, skipping");
            return Ok(MigrationOutcome::NoChange);
        }

        self.conn
            .run(&self.migrator)
            .await
            .map_err(|e| DbInfraError::migration(format!("failed to apply migrations: {e}")))?;

        info!(
            count = pending.len(),
            versions = ?pending,
            "migrate=done direction=up"
        );
        Ok(MigrationOutcome::Applied {
            count: pending.len(),
        })
    }

    /// Revert every applied migration that has a down script. Returns how many
    /// were reverted.
    pub async fn down_all(&mut self) -> Result<usize, DbInfraError> {
        let before = self.applied_versions().await?;
        info!(applied = before.len(), "migrate=start direction=down");

        self.conn
            .undo(&self.migrator, 0)
            .await
            .map_err(|e| DbInfraError::migration(format!("failed to revert migrations: {e}")))?;

        let after = self.applied_versions().await?;
        if !after.is_empty() {
            warn!(
                remaining = ?after,
                "some migrations have no down script and stay applied"
            );
        }

        let reverted = before.len().saturating_sub(after.len());
        info!(reverted, "migrate=done direction=down");
        Ok(reverted)
    }

    /// Close the migration connection.
    pub async fn close(self) -> Result<(), DbInfraError> {
        info!(source = %self.source.uri(), "closing migration connection");
        self.conn.close().await.map_err(|e| {
            DbInfraError::connection(format!("failed to close migration connection: {e}"))
        })
    }
}
