//! Repository layer for database operations

pub mod countdowns;
pub mod shops;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::config::DatabaseConfig;
use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open the configured database, creating the file when absent, and
    /// bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        use sqlx::migrate::MigrateDatabase;

        if !Sqlite::database_exists(&config.url).await.unwrap_or(false) {
            Sqlite::create_database(&config.url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;

        Ok(Self::new(pool))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fresh migrated in-memory database. One connection keeps the
    /// `:memory:` store alive and shared for the whole test.
    pub async fn memory_repository() -> Repository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("run migrations");

        Repository::new(pool)
    }
}
