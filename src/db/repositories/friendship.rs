use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{FriendshipStatus, PartySummary, pair_key};
use crate::entities::{accounts, friendships, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: String,
    pub requester_id: String,
    pub recipient_id: String,
    pub status: FriendshipStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<friendships::Model> for Friendship {
    type Error = anyhow::Error;

    fn try_from(model: friendships::Model) -> Result<Self> {
        let status = model
            .status
            .parse()
            .with_context(|| format!("Corrupt status on friendship {}", model.id))?;

        Ok(Self {
            id: model.id,
            requester_id: model.requester_id,
            recipient_id: model.recipient_id,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl Friendship {
    /// The party on the other side of `user_id`.
    #[must_use]
    pub fn other_party(&self, user_id: &str) -> &str {
        if self.requester_id == user_id {
            &self.recipient_id
        } else {
            &self.requester_id
        }
    }
}

pub struct FriendshipRepository {
    conn: DatabaseConnection,
}

impl FriendshipRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a PENDING request from `requester_id` to `recipient_id`.
    ///
    /// A second record for the same unordered pair fails on the `pair_key`
    /// unique constraint, and unknown account ids fail on the foreign keys.
    pub async fn create(&self, requester_id: &str, recipient_id: &str) -> Result<Friendship> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = friendships::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            requester_id: Set(requester_id.to_string()),
            recipient_id: Set(recipient_id.to_string()),
            pair_key: Set(pair_key(requester_id, recipient_id)),
            status: Set(FriendshipStatus::Pending.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert friendship")?;

        Friendship::try_from(model)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Friendship>> {
        Friendships::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query friendship by ID")?
            .map(Friendship::try_from)
            .transpose()
    }

    /// Move a PENDING record to ACCEPTED or REJECTED.
    ///
    /// The status guard sits in the UPDATE itself, so a record that already
    /// reached a terminal state is left untouched. Returns `None` when nothing
    /// was updated; the caller tells "missing" from "already answered" with
    /// [`Self::get`].
    pub async fn answer(&self, id: &str, accept: bool) -> Result<Option<Friendship>> {
        let now = chrono::Utc::now().to_rfc3339();
        let status = FriendshipStatus::from_response(accept);

        let result = Friendships::update_many()
            .col_expr(friendships::Column::Status, Expr::value(status.as_str()))
            .col_expr(friendships::Column::UpdatedAt, Expr::value(now))
            .filter(friendships::Column::Id.eq(id))
            .filter(friendships::Column::Status.eq(FriendshipStatus::Pending.as_str()))
            .exec(&self.conn)
            .await
            .context("Failed to update friendship status")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    pub async fn pending_for_recipient(
        &self,
        user_id: &str,
    ) -> Result<Vec<(Friendship, PartySummary)>> {
        let rows = Friendships::find()
            .filter(friendships::Column::RecipientId.eq(user_id))
            .filter(friendships::Column::Status.eq(FriendshipStatus::Pending.as_str()))
            .order_by_asc(friendships::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to query incoming friend requests")?;

        self.with_party(rows, |f| f.requester_id.clone()).await
    }

    pub async fn pending_for_requester(
        &self,
        user_id: &str,
    ) -> Result<Vec<(Friendship, PartySummary)>> {
        let rows = Friendships::find()
            .filter(friendships::Column::RequesterId.eq(user_id))
            .filter(friendships::Column::Status.eq(FriendshipStatus::Pending.as_str()))
            .order_by_asc(friendships::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to query outgoing friend requests")?;

        self.with_party(rows, |f| f.recipient_id.clone()).await
    }

    /// Public identity of every accepted friend of `user_id`.
    pub async fn accepted_for(&self, user_id: &str) -> Result<Vec<PartySummary>> {
        let rows = Friendships::find()
            .filter(
                Condition::any()
                    .add(friendships::Column::RequesterId.eq(user_id))
                    .add(friendships::Column::RecipientId.eq(user_id)),
            )
            .filter(friendships::Column::Status.eq(FriendshipStatus::Accepted.as_str()))
            .all(&self.conn)
            .await
            .context("Failed to query friends")?;

        let owner = user_id.to_string();
        let friends = self
            .with_party(rows, move |f| f.other_party(&owner).to_string())
            .await?;

        Ok(friends.into_iter().map(|(_, party)| party).collect())
    }

    /// Delete the ACCEPTED record for the unordered pair, if any.
    pub async fn delete_accepted(&self, user_id: &str, friend_id: &str) -> Result<u64> {
        let result = Friendships::delete_many()
            .filter(friendships::Column::PairKey.eq(pair_key(user_id, friend_id)))
            .filter(friendships::Column::Status.eq(FriendshipStatus::Accepted.as_str()))
            .exec(&self.conn)
            .await
            .context("Failed to delete friendship")?;

        Ok(result.rows_affected)
    }

    /// Attach the public identity of one party to each record.
    ///
    /// Records whose party no longer resolves are dropped; the cascade on
    /// account deletion makes that a transient state at most.
    async fn with_party<F>(
        &self,
        rows: Vec<friendships::Model>,
        party_of: F,
    ) -> Result<Vec<(Friendship, PartySummary)>>
    where
        F: Fn(&Friendship) -> String,
    {
        let friendships = rows
            .into_iter()
            .map(Friendship::try_from)
            .collect::<Result<Vec<_>>>()?;

        if friendships.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = friendships.iter().map(&party_of).collect();
        let parties: HashMap<String, String> = Accounts::find()
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.conn)
            .await
            .context("Failed to resolve friendship parties")?
            .into_iter()
            .map(|a| (a.id, a.username))
            .collect();

        Ok(friendships
            .into_iter()
            .filter_map(|f| {
                let id = party_of(&f);
                let username = parties.get(&id)?.clone();
                Some((f, PartySummary { id, username }))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(requester: &str, recipient: &str) -> Friendship {
        Friendship {
            id: "f1".to_string(),
            requester_id: requester.to_string(),
            recipient_id: recipient.to_string(),
            status: FriendshipStatus::Accepted,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_other_party() {
        let f = sample("alice", "bob");
        assert_eq!(f.other_party("alice"), "bob");
        assert_eq!(f.other_party("bob"), "alice");
    }

    #[test]
    fn test_model_with_unknown_status_is_rejected() {
        let model = friendships::Model {
            id: "f1".to_string(),
            requester_id: "a".to_string(),
            recipient_id: "b".to_string(),
            pair_key: pair_key("a", "b"),
            status: "MAYBE".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };

        assert!(Friendship::try_from(model).is_err());
    }
}
