use crate::models::user::User;
use sqlx::{Pool, Postgres};
use tracing::instrument;

/// All SQL for the `users` table. Positional binds only.
#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    #[instrument(name = "Fetching user by email from database", skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password FROM users WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user: {:?}", e);
            e
        })
    }

    /// Insert when the record has no id yet, otherwise overwrite the row it
    /// points at. Either way the returned record carries the row as the
    /// database now holds it.
    #[instrument(name = "Saving user to database", skip(self, user), fields(user_email = %user.email))]
    pub async fn save(&self, user: &User) -> Result<User, sqlx::Error> {
        match user.id {
            Some(id) => self.update(id, user).await,
            None => self.insert(user).await,
        }
    }

    async fn insert(&self, user: &User) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id, email, password",
        )
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert user: {:?}", e);
            e
        })
    }

    async fn update(&self, id: i32, user: &User) -> Result<User, sqlx::Error> {
        // RETURNING yields no row when the id no longer matches anything;
        // surface that as RowNotFound instead of handing back stale fields
        sqlx::query_as::<_, User>(
            "UPDATE users SET email = $1, password = $2 WHERE id = $3 RETURNING id, email, password",
        )
        .bind(&user.email)
        .bind(&user.password)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user: {:?}", e);
            e
        })?
        .ok_or(sqlx::Error::RowNotFound)
    }
}
