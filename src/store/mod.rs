pub mod user;
pub use user::UserRepository;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::instrument;

use crate::configuration::DatabaseSettings;

/// Owns the connection pool and the schema bootstrap.
#[derive(Clone, Debug)]
pub struct Storage {
    pool: PgPool,
}

impl Storage {
    /// Build a lazy pool; no connection is attempted until the first query.
    pub fn connect(settings: &DatabaseSettings) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(2))
            .connect_lazy_with(settings.connect_options()?);
        Ok(Self { pool })
    }

    /// Idempotent schema bootstrap: create the users table if it is missing.
    #[instrument(name = "Ensuring users table exists", skip(self))]
    pub async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
              id SERIAL PRIMARY KEY,
              email TEXT UNIQUE NOT NULL,
              password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}
