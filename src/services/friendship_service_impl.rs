//! `SeaORM` implementation of the `FriendshipService` trait.

use async_trait::async_trait;
use sea_orm::SqlErr;
use tracing::{debug, info};

use crate::db::{Friendship, Store, sql_error};
use crate::domain::PartySummary;
use crate::services::friendship_service::{
    FriendshipError, FriendshipService, IncomingRequest, OutgoingRequest,
};

pub struct SeaOrmFriendshipService {
    store: Store,
}

impl SeaOrmFriendshipService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FriendshipService for SeaOrmFriendshipService {
    async fn send_request(
        &self,
        from_id: &str,
        to_id: &str,
    ) -> Result<Friendship, FriendshipError> {
        if from_id.is_empty() || to_id.is_empty() {
            return Err(FriendshipError::InvalidRequest(
                "Both account ids are required".to_string(),
            ));
        }

        if from_id == to_id {
            return Err(FriendshipError::InvalidRequest(
                "You can't add yourself".to_string(),
            ));
        }

        let friendship = self
            .store
            .create_friendship(from_id, to_id)
            .await
            .map_err(|e| match sql_error(&e) {
                Some(SqlErr::UniqueConstraintViolation(_)) => FriendshipError::AlreadyExists,
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    FriendshipError::InvalidRequest("Unknown account".to_string())
                }
                _ => FriendshipError::from(e),
            })?;

        info!(
            friendship_id = %friendship.id,
            requester_id = %from_id,
            recipient_id = %to_id,
            "Friend request sent"
        );
        Ok(friendship)
    }

    async fn incoming_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<IncomingRequest>, FriendshipError> {
        let rows = self.store.incoming_friend_requests(user_id).await?;

        Ok(rows
            .into_iter()
            .map(|(friendship, requester)| IncomingRequest {
                friendship,
                requester,
            })
            .collect())
    }

    async fn outgoing_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<OutgoingRequest>, FriendshipError> {
        let rows = self.store.outgoing_friend_requests(user_id).await?;

        Ok(rows
            .into_iter()
            .map(|(friendship, recipient)| OutgoingRequest {
                friendship,
                recipient,
            })
            .collect())
    }

    async fn respond(
        &self,
        friendship_id: &str,
        accept: bool,
    ) -> Result<Friendship, FriendshipError> {
        if let Some(friendship) = self.store.answer_friendship(friendship_id, accept).await? {
            info!(
                friendship_id = %friendship.id,
                status = %friendship.status,
                "Friend request answered"
            );
            return Ok(friendship);
        }

        match self.store.get_friendship(friendship_id).await? {
            Some(existing) => Err(FriendshipError::InvalidState {
                id: existing.id,
                status: existing.status,
            }),
            None => Err(FriendshipError::NotFound(friendship_id.to_string())),
        }
    }

    async fn list_friends(&self, user_id: &str) -> Result<Vec<PartySummary>, FriendshipError> {
        Ok(self.store.list_friends(user_id).await?)
    }

    async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<u64, FriendshipError> {
        let removed = self.store.remove_friendship(user_id, friend_id).await?;
        debug!(user_id = %user_id, friend_id = %friend_id, removed, "Friend removal");
        Ok(removed)
    }
}
