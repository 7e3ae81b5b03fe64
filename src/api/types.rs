use serde::{Deserialize, Serialize};

use crate::db::Friendship;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest {
    pub from_user_id: String,
    pub to_user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RespondFriendRequest {
    pub accept: bool,
}

#[derive(Debug, Serialize)]
pub struct RespondFriendResponse {
    pub message: String,
    pub friendship: Friendship,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFriendRequest {
    pub user_id: String,
    pub friend_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub database: bool,
    pub uptime_seconds: u64,
    pub version: &'static str,
}
