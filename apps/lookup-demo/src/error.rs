use db_infra::DbInfraError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error(transparent)]
    Infra(#[from] DbInfraError),
}

impl AppError {
    /// Stable error code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Db { .. } => "DB_ERROR",
            AppError::NotFound { code, .. } => code,
            AppError::Infra(DbInfraError::Config { .. }) => "CONFIG_ERROR",
            AppError::Infra(DbInfraError::MigrationSource { .. }) => "MIGRATION_SOURCE_ERROR",
            AppError::Infra(DbInfraError::Migration { .. }) => "MIGRATION_ERROR",
            AppError::Infra(DbInfraError::Connection { .. }) => "CONNECTION_ERROR",
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Db {
            detail: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_infra_variant() {
        let cases = [
            (DbInfraError::config("x"), "CONFIG_ERROR"),
            (DbInfraError::migration_source("x"), "MIGRATION_SOURCE_ERROR"),
            (DbInfraError::migration("x"), "MIGRATION_ERROR"),
            (DbInfraError::connection("x"), "CONNECTION_ERROR"),
        ];
        for (infra, code) in cases {
            assert_eq!(AppError::from(infra).code(), code);
        }
    }

    #[test]
    fn test_infra_message_is_transparent() {
        let err = AppError::from(DbInfraError::migration("failed to apply migrations: boom"));
        assert_eq!(
            err.to_string(),
            "Migration error: failed to apply migrations: boom"
        );
    }

    #[test]
    fn test_db_err_maps_to_db() {
        let err = AppError::from(sea_orm::DbErr::Custom("bad row".to_string()));
        assert_eq!(err.code(), "DB_ERROR");
        assert!(err.to_string().contains("bad row"));
    }
}
