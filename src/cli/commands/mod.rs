mod account;
mod friends;

pub use account::{
    cmd_account_create, cmd_account_delete, cmd_account_disable, cmd_account_list,
    cmd_account_show, cmd_account_verify,
};
pub use friends::{cmd_friends_incoming, cmd_friends_list};
