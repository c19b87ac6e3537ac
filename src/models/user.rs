use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// A user record. `id` is `None` until the row has been persisted; the
/// database assigns it on insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i32>,
    pub email: String,
    pub password: String,
}

impl User {
    /// A not-yet-persisted draft.
    pub fn draft(email: &str, password: &str) -> Self {
        Self {
            id: None,
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
