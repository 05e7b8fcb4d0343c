//! Shared fixtures for lookup-demo integration tests.

#![allow(dead_code)]

use db_infra::config::db::DbConfig;
use db_infra::config::paths::resolve_migration_source;
use db_infra::{connect_app, MigrationRunner};
use demo_test_support::{logging, ScratchDb};
use lookup_demo::{AppConfig, DemoOptions};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

/// A scratch database with the lookups schema applied and an open
/// application connection.
pub struct MigratedDb {
    pub runner: MigrationRunner,
    pub conn: DatabaseConnection,
    pub config: DbConfig,
    pub scratch: ScratchDb,
}

pub async fn migrated_db() -> MigratedDb {
    logging::init();
    let scratch = ScratchDb::with_lookups_schema().expect("create scratch db");
    let config = DbConfig::sqlite_file(scratch.db_name());
    let source = resolve_migration_source(scratch.migrations_dir()).expect("migration source");

    let mut runner = MigrationRunner::open(&config, &source)
        .await
        .expect("open migration runner");
    runner.up().await.expect("migrate up");

    let conn = connect_app(&config).await.expect("open app connection");

    MigratedDb {
        runner,
        conn,
        config,
        scratch,
    }
}

pub fn app_config(scratch: &ScratchDb) -> AppConfig {
    AppConfig {
        db: DbConfig::sqlite_file(scratch.db_name()),
        migrations_dir: scratch.migrations_dir().to_path_buf(),
        demo: DemoOptions::default(),
    }
}

pub async fn sqlite_table_exists(config: &DbConfig, table: &str) -> bool {
    let conn = connect_app(config).await.expect("open inspection connection");
    let row = conn
        .query_one(Statement::from_sql_and_values(
            config.kind.into(),
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table.into()],
        ))
        .await
        .expect("query sqlite_master")
        .expect("count row");
    let count: i64 = row.try_get("", "n").expect("count column");
    conn.close().await.expect("close inspection connection");
    count == 1
}
