use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbInfraError {
    #[error("Configuration error: {message}")]
    Config { message: String },
    #[error("Migration source error: {message}")]
    MigrationSource { message: String },
    #[error("Migration error: {message}")]
    Migration { message: String },
    #[error("Connection error: {message}")]
    Connection { message: String },
}

impl DbInfraError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn migration_source(message: impl Into<String>) -> Self {
        Self::MigrationSource {
            message: message.into(),
        }
    }

    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DbInfraError::Config { message }
            | DbInfraError::MigrationSource { message }
            | DbInfraError::Migration { message }
            | DbInfraError::Connection { message } => message,
        }
    }
}
