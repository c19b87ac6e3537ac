use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::instrument;

use crate::errors::ApiError;
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LookupPayload {
    pub email: String,
}

#[instrument(name = "HTTP: Create user", skip(state, payload))]
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let user = state
        .user_service
        .create(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(name = "HTTP: Update user", skip(state, payload))]
pub async fn update_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let user = state
        .user_service
        .update(&payload.email, &payload.password)
        .await?;

    Ok(Json(user))
}

#[instrument(name = "HTTP: Lookup user", skip(state, payload))]
pub async fn lookup_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<LookupPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let user = state
        .user_service
        .lookup(&payload.email)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(user))
}
