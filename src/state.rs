use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, FriendshipService, SeaOrmAccountService, SeaOrmFriendshipService,
};

/// Everything a request handler or CLI command needs, built once at startup.
///
/// The store is constructed here and handed to each service; nothing below
/// this point reaches for a global connection.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub accounts: Arc<dyn AccountService>,

    pub friendships: Arc<dyn FriendshipService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let accounts = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AccountService + Send + Sync + 'static>;

        let friendships = Arc::new(SeaOrmFriendshipService::new(store.clone()))
            as Arc<dyn FriendshipService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            accounts,
            friendships,
        }
    }
}
