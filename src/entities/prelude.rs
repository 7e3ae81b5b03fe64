pub use super::accounts::Entity as Accounts;
pub use super::friendships::Entity as Friendships;
