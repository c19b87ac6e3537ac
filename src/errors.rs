use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything a request can fail with. The `IntoResponse` impl below is the
/// single place that picks a status code and a client-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No user found for that email.")]
    UserNotFound,

    #[error("A user with this email already exists.")]
    EmailTaken,

    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),

    #[error("Something went wrong.")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::EmailTaken,
            _ => ApiError::Database(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // full detail goes to the log; the client only ever sees `message`
        tracing::error!(error = ?self, "request failed");

        let status = match &self {
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn message_of(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["message"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn user_not_found_is_404() {
        let response = ApiError::UserNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!message_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn email_taken_is_409() {
        let response = ApiError::EmailTaken.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn driver_errors_are_500_with_generic_message() {
        let response = ApiError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_of(response).await, "Something went wrong.");
    }

    #[test]
    fn plain_driver_errors_stay_database_errors() {
        let err = ApiError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, ApiError::Database(_)));
    }
}
