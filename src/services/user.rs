use crate::{errors::ApiError, models::user::User, store::user::UserRepository};
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Zero matches is a plain `None`, never an error. An empty email
    /// short-circuits without touching the database.
    #[instrument(name = "UserService: lookup", skip(self))]
    pub async fn lookup(&self, email: &str) -> Result<Option<User>, ApiError> {
        if email.is_empty() {
            return Ok(None);
        }
        Ok(self.repo.find_by_email(email).await?)
    }

    // The password is stored exactly as provided; it is not hashed here.
    #[instrument(name = "UserService: create", skip(self, password), fields(user_email = %email))]
    pub async fn create(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let draft = User::draft(email, password);
        Ok(self.repo.save(&draft).await?)
    }

    /// Overwrite every field of the row behind `email`. Unknown email, or a
    /// row deleted out from under us between lookup and save, is a not-found.
    #[instrument(name = "UserService: update", skip(self, password), fields(user_email = %email))]
    pub async fn update(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let existing = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let changed = User {
            id: existing.id,
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.repo.save(&changed).await.map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::UserNotFound,
            other => other.into(),
        })
    }
}
