//! Friendship state machine and the canonical unordered-pair key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a friendship record.
///
/// A record is created as [`FriendshipStatus::Pending`] and moves exactly once
/// to either [`FriendshipStatus::Accepted`] or [`FriendshipStatus::Rejected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendshipStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Status a pending request moves to when answered.
    #[must_use]
    pub const fn from_response(accept: bool) -> Self {
        if accept { Self::Accepted } else { Self::Rejected }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown friendship status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for FriendshipStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Public identity of the other party in a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySummary {
    pub id: String,
    pub username: String,
}

/// Builds the key identifying the unordered pair `{a, b}`.
///
/// `pair_key(a, b) == pair_key(b, a)` for any ids.
#[must_use]
pub fn pair_key(a: &str, b: &str) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("{low}:{high}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(pair_key("alice", "bob"), pair_key("bob", "alice"));
        assert_eq!(pair_key("alice", "bob"), "alice:bob");
        assert_ne!(pair_key("alice", "bob"), pair_key("alice", "carol"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "PENDING".parse::<FriendshipStatus>(),
            Ok(FriendshipStatus::Pending)
        );
        assert_eq!(
            "ACCEPTED".parse::<FriendshipStatus>(),
            Ok(FriendshipStatus::Accepted)
        );
        assert!("accepted".parse::<FriendshipStatus>().is_err());
        assert_eq!(FriendshipStatus::Rejected.to_string(), "REJECTED");
    }

    #[test]
    fn test_from_response() {
        assert_eq!(
            FriendshipStatus::from_response(true),
            FriendshipStatus::Accepted
        );
        assert_eq!(
            FriendshipStatus::from_response(false),
            FriendshipStatus::Rejected
        );
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&FriendshipStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }
}
