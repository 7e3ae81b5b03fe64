//! Relationship ledger endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    ApiError, AppState, MessageResponse, RemoveFriendRequest, RespondFriendRequest,
    RespondFriendResponse, SendFriendRequest,
};
use crate::api::validation::validate_id;
use crate::db::Friendship;
use crate::domain::PartySummary;
use crate::services::{FriendshipError, IncomingRequest, OutgoingRequest};

impl From<FriendshipError> for ApiError {
    fn from(err: FriendshipError) -> Self {
        match err {
            FriendshipError::InvalidRequest(msg) => Self::validation(msg),
            // Duplicate pairs are reported as a bad request, like self-requests.
            FriendshipError::AlreadyExists => Self::validation(err.to_string()),
            FriendshipError::NotFound(_) => Self::NotFound("Friend request not found".to_string()),
            FriendshipError::InvalidState { .. } => Self::InvalidState(err.to_string()),
            FriendshipError::Database(msg) => Self::DatabaseError(msg),
            FriendshipError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `POST /friendships`
pub async fn send_request(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendFriendRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Friendship>), ApiError> {
    let Json(payload) = payload?;
    let from = validate_id("fromUserId", &payload.from_user_id)?;
    let to = validate_id("toUserId", &payload.to_user_id)?;

    let friendship = state.friendships().send_request(from, to).await?;

    Ok((StatusCode::CREATED, Json(friendship)))
}

/// `GET /friendships/incoming/{user_id}`
pub async fn incoming_requests(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<IncomingRequest>>, ApiError> {
    let user_id = validate_id("userId", &user_id)?;
    Ok(Json(state.friendships().incoming_requests(user_id).await?))
}

/// `GET /friendships/outgoing/{user_id}`
pub async fn outgoing_requests(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<OutgoingRequest>>, ApiError> {
    let user_id = validate_id("userId", &user_id)?;
    Ok(Json(state.friendships().outgoing_requests(user_id).await?))
}

/// `PATCH /friendships/{friendship_id}`
pub async fn respond(
    State(state): State<Arc<AppState>>,
    Path(friendship_id): Path<String>,
    payload: Result<Json<RespondFriendRequest>, JsonRejection>,
) -> Result<Json<RespondFriendResponse>, ApiError> {
    let Json(payload) = payload?;
    let friendship_id = validate_id("friendshipId", &friendship_id)?;

    let friendship = state
        .friendships()
        .respond(friendship_id, payload.accept)
        .await?;

    Ok(Json(RespondFriendResponse {
        message: format!(
            "Friend request {}",
            friendship.status.as_str().to_lowercase()
        ),
        friendship,
    }))
}

/// `GET /friendships/{user_id}`
pub async fn list_friends(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<PartySummary>>, ApiError> {
    let user_id = validate_id("userId", &user_id)?;
    Ok(Json(state.friendships().list_friends(user_id).await?))
}

/// `DELETE /friendships`
///
/// Reports success whether or not the pair were friends.
pub async fn remove_friend(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RemoveFriendRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;
    let user_id = validate_id("userId", &payload.user_id)?;
    let friend_id = validate_id("friendId", &payload.friend_id)?;

    state.friendships().remove_friend(user_id, friend_id).await?;

    Ok(Json(MessageResponse::new("Friend removed")))
}
