//! Domain types shared by the account directory and the relationship ledger.

pub mod friendship;

pub use friendship::{FriendshipStatus, PartySummary, pair_key};
