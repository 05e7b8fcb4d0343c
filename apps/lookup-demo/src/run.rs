//! Entry sequence: configure, migrate up, run the demo, clean up.
//!
//! Failures before the schema is migrated abort straight away. Once `up()`
//! has succeeded, cleanup always runs, and the first error is reported.

use db_infra::config::env::{apply_env_source, select_env_source};
use db_infra::config::paths::resolve_migration_source;
use db_infra::{connect_app, MigrationOutcome, MigrationRunner};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::config::{AppConfig, BUNDLED_ENV};
use crate::demo::{run_demo, DemoReport};
use crate::error::AppError;

/// Apply the env overlay to the process environment and build the typed
/// configuration from the merged view.
///
/// Anything that reads the environment on its own (the tracing filter,
/// `LOG_FORMAT`) must be initialised after this call to see overlay values.
pub fn load_config() -> Result<AppConfig, AppError> {
    let source = select_env_source(BUNDLED_ENV);
    apply_env_source(source.as_ref())?;
    AppConfig::from_env()
}

/// Load configuration from the environment overlay and run the whole sequence.
pub async fn run() -> Result<DemoReport, AppError> {
    let config = load_config()?;
    run_with(&config).await
}

/// Run the sequence with an already built configuration.
pub async fn run_with(config: &AppConfig) -> Result<DemoReport, AppError> {
    let source = resolve_migration_source(&config.migrations_dir)?;
    info!(source = %source.uri(), "migration source resolved");

    let mut runner = MigrationRunner::open(&config.db, &source).await?;
    let outcome = runner.up().await;
    match outcome {
        Ok(MigrationOutcome::NoChange) => info!("schema already up to date"),
        Ok(MigrationOutcome::Applied { count }) => info!(count, "migration completed successfully"),
        Err(e) => {
            if let Err(close_err) = runner.close().await {
                warn!(error = %close_err, "failed to close migration connection after error");
            }
            return Err(e.into());
        }
    }

    let conn = match connect_app(&config.db).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "application connection failed, reverting migrations");
            if let Err(cleanup_err) = release_migrations(runner).await {
                error!(error = %cleanup_err, "cleanup after connection failure failed");
            }
            return Err(e.into());
        }
    };

    let report = run_demo(&conn, &config.demo).await;
    if let Err(e) = &report {
        error!(code = e.code(), error = %e, "demo failed, cleaning up");
    }

    let cleaned = cleanup(runner, conn).await;
    let report = report?;
    cleaned?;
    Ok(report)
}

/// Revert all migrations, close the migration connection, then close the
/// application connection. Every step runs; the first error is returned.
pub async fn cleanup(runner: MigrationRunner, conn: DatabaseConnection) -> Result<(), AppError> {
    info!("completed all operations, dropping all tables created from migrations");
    let migrations = release_migrations(runner).await;

    info!("closing application connection");
    let app = conn.close().await.map_err(AppError::from);
    match &app {
        Ok(()) => info!("application connection closed"),
        Err(e) => error!(error = %e, "failed to close application connection"),
    }

    migrations.and(app)?;
    info!("clean up successful");
    Ok(())
}

async fn release_migrations(mut runner: MigrationRunner) -> Result<(), AppError> {
    let reverted = runner.down_all().await;
    if let Err(e) = &reverted {
        error!(error = %e, "failed to revert migrations");
    }

    let closed = runner.close().await;
    if let Err(e) = &closed {
        error!(error = %e, "failed to close migration connection");
    }

    reverted?;
    closed?;
    Ok(())
}
