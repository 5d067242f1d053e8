//! Database primitives and the employee record store.

mod employees;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use serde::Deserialize;
use thiserror::Error;

pub use employees::{EmployeeRecord, EmployeeStore, SeaOrmEmployeeStore};

/// Shared connection pool handle.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing: set {0}")]
    MissingUrl(String),
    #[error("invalid employee id `{id}`: {source}")]
    InvalidId {
        id: String,
        #[source]
        source: uuid::Error,
    },
    #[error(transparent)]
    Query(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

const URL_KEY: &str = "DATABASE_URL";
const MAX_CONNECTIONS_KEY: &str = "DATABASE_MAX_CONNECTIONS";

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
        }
    }

    pub fn from_env() -> DbResult<Self> {
        let url = std::env::var(URL_KEY).map_err(|_| DbError::MissingUrl(URL_KEY.into()))?;
        let max_connections = std::env::var(MAX_CONNECTIONS_KEY)
            .ok()
            .and_then(|raw| raw.trim().parse::<u32>().ok());
        Ok(Self {
            url,
            max_connections,
        })
    }
}

/// Open the pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.url.clone());
    options.sqlx_logging(false);
    if let Some(max) = settings.max_connections {
        options.max_connections(max);
    }
    let pool = Database::connect(options).await?;
    tracing::debug!(backend = ?pool.get_database_backend(), "database pool ready");
    Ok(pool)
}
