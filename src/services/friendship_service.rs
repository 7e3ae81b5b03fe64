//! Domain service for the relationship ledger.
//!
//! A friendship is created PENDING by the requester and answered once by the
//! recipient. At most one record exists per unordered pair of accounts, in
//! any status, so a rejected pair stays blocked until the record is removed.

use serde::Serialize;
use thiserror::Error;

use crate::db::Friendship;
use crate::domain::{FriendshipStatus, PartySummary};

/// Errors specific to friendship operations.
#[derive(Debug, Error)]
pub enum FriendshipError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Friendship already exists or pending")]
    AlreadyExists,

    #[error("Friend request not found: {0}")]
    NotFound(String),

    #[error("Friend request {id} was already {status}")]
    InvalidState {
        id: String,
        status: FriendshipStatus,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for FriendshipError {
    fn from(err: anyhow::Error) -> Self {
        if crate::db::is_storage_error(&err) {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(format!("{err:#}"))
        }
    }
}

/// A pending request addressed to the caller, with the requester's identity.
#[derive(Debug, Clone, Serialize)]
pub struct IncomingRequest {
    #[serde(flatten)]
    pub friendship: Friendship,
    pub requester: PartySummary,
}

/// A pending request sent by the caller, with the recipient's identity.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingRequest {
    #[serde(flatten)]
    pub friendship: Friendship,
    pub recipient: PartySummary,
}

/// Domain service trait for friendships.
#[async_trait::async_trait]
pub trait FriendshipService: Send + Sync {
    /// Creates a PENDING request from `from_id` to `to_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipError::InvalidRequest`] for a self-request or an
    /// unknown account, and [`FriendshipError::AlreadyExists`] when any
    /// record already links the pair.
    async fn send_request(&self, from_id: &str, to_id: &str)
    -> Result<Friendship, FriendshipError>;

    async fn incoming_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<IncomingRequest>, FriendshipError>;

    async fn outgoing_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<OutgoingRequest>, FriendshipError>;

    /// Accepts or rejects a pending request.
    ///
    /// # Errors
    ///
    /// Returns [`FriendshipError::NotFound`] for an unknown id and
    /// [`FriendshipError::InvalidState`] when the request was already answered.
    async fn respond(&self, friendship_id: &str, accept: bool)
    -> Result<Friendship, FriendshipError>;

    async fn list_friends(&self, user_id: &str) -> Result<Vec<PartySummary>, FriendshipError>;

    /// Removes an accepted friendship between two accounts.
    ///
    /// Succeeds whether or not such a friendship existed; returns how many
    /// records were deleted.
    async fn remove_friend(&self, user_id: &str, friend_id: &str)
    -> Result<u64, FriendshipError>;
}
