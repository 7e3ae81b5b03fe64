pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountError, AccountService};
pub use account_service_impl::SeaOrmAccountService;

pub mod friendship_service;
pub mod friendship_service_impl;
pub use friendship_service::{
    FriendshipError, FriendshipService, IncomingRequest, OutgoingRequest,
};
pub use friendship_service_impl::SeaOrmFriendshipService;
