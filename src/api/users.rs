//! Account directory endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, CreateUserRequest, MessageResponse};
use crate::db::Account;
use crate::services::AccountError;

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(msg) => Self::validation(msg),
            AccountError::NotFound(username) => Self::not_found("User", username),
            AccountError::Conflict(msg) => Self::Conflict(msg),
            AccountError::Database(msg) => Self::DatabaseError(msg),
            AccountError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `POST /users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let Json(payload) = payload?;

    let account = state
        .accounts()
        .register(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// `GET /users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.accounts().list().await?))
}

/// `GET /users/{username}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.accounts().get_by_username(&username).await?))
}

/// `PATCH /users/{username}/disable`
pub async fn disable_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.accounts().disable(&username).await?;
    Ok(Json(MessageResponse::new("User disabled")))
}

/// `DELETE /users/{username}`
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.accounts().delete(&username).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
