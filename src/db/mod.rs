use crate::config::SecurityConfig;
use crate::domain::PartySummary;
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::account::Account;
pub use repositories::friendship::Friendship;

/// Process-wide handle on the connection pool.
///
/// Cloning is cheap; every service receives its own clone at construction.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !is_in_memory(db_url) {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let conn =
            Database::connect(connect_options(db_url, max_connections, min_connections)).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Single-connection in-memory database, used by tests and `--ephemeral` runs.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    /// Fails unless the schema is reachable, not just the connection.
    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(
                backend,
                "SELECT 1 FROM accounts LIMIT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn friendship_repo(&self) -> repositories::friendship::FriendshipRepository {
        repositories::friendship::FriendshipRepository::new(self.conn.clone())
    }

    // Accounts

    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Account> {
        self.account_repo()
            .create(username, password, security)
            .await
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.account_repo().list_all().await
    }

    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_username(username).await
    }

    pub async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn disable_account(&self, username: &str) -> Result<bool> {
        self.account_repo().disable(username).await
    }

    pub async fn delete_account(&self, username: &str) -> Result<bool> {
        self.account_repo().delete(username).await
    }

    pub async fn verify_account_password(&self, username: &str, password: &str) -> Result<bool> {
        self.account_repo().verify_password(username, password).await
    }

    // Friendships

    pub async fn create_friendship(
        &self,
        requester_id: &str,
        recipient_id: &str,
    ) -> Result<Friendship> {
        self.friendship_repo()
            .create(requester_id, recipient_id)
            .await
    }

    pub async fn get_friendship(&self, id: &str) -> Result<Option<Friendship>> {
        self.friendship_repo().get(id).await
    }

    pub async fn answer_friendship(&self, id: &str, accept: bool) -> Result<Option<Friendship>> {
        self.friendship_repo().answer(id, accept).await
    }

    pub async fn incoming_friend_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<(Friendship, PartySummary)>> {
        self.friendship_repo().pending_for_recipient(user_id).await
    }

    pub async fn outgoing_friend_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<(Friendship, PartySummary)>> {
        self.friendship_repo().pending_for_requester(user_id).await
    }

    pub async fn list_friends(&self, user_id: &str) -> Result<Vec<PartySummary>> {
        self.friendship_repo().accepted_for(user_id).await
    }

    pub async fn remove_friendship(&self, user_id: &str, friend_id: &str) -> Result<u64> {
        self.friendship_repo()
            .delete_accepted(user_id, friend_id)
            .await
    }
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// Idle timeout and maximum lifetime for pooled connections.
///
/// An in-memory SQLite database is dropped together with its last
/// connection, so those connections are never recycled.
fn connection_lifetimes(db_url: &str) -> (Option<Duration>, Option<Duration>) {
    if is_in_memory(db_url) {
        (None, None)
    } else {
        (Some(Duration::from_secs(300)), Some(Duration::from_secs(600)))
    }
}

fn connect_options(db_url: &str, max_connections: u32, min_connections: u32) -> ConnectOptions {
    let (idle_timeout, max_lifetime) = connection_lifetimes(db_url);

    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.max_connections(max_connections)
        .min_connections(min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if let Some(idle_timeout) = idle_timeout {
        opt.idle_timeout(idle_timeout);
    }
    if let Some(max_lifetime) = max_lifetime {
        opt.max_lifetime(max_lifetime);
    }
    opt
}

/// Classifies a storage failure buried anywhere in an error chain.
///
/// Used to turn unique and foreign-key violations into domain errors instead of
/// checking for them up front.
#[must_use]
pub fn sql_error(err: &anyhow::Error) -> Option<SqlErr> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<DbErr>())
        .and_then(DbErr::sql_err)
}

/// True when the failure originated in the database driver.
#[must_use]
pub fn is_storage_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<DbErr>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_migrates_and_pings() {
        let store = Store::in_memory().await.unwrap();
        store.ping().await.unwrap();
        assert!(store.list_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sql_error_classifies_unique_violation() {
        let store = Store::in_memory().await.unwrap();
        let security = SecurityConfig::minimal();

        store
            .create_account("alice", "secret-1", &security)
            .await
            .unwrap();
        let err = store
            .create_account("alice", "secret-2", &security)
            .await
            .unwrap_err();

        assert!(matches!(
            sql_error(&err),
            Some(SqlErr::UniqueConstraintViolation(_))
        ));
    }

    #[test]
    fn test_in_memory_connections_are_never_recycled() {
        assert_eq!(connection_lifetimes("sqlite::memory:"), (None, None));
        assert_eq!(
            connection_lifetimes("sqlite:file:shared?mode=memory&cache=shared"),
            (None, None)
        );

        let (idle, lifetime) = connection_lifetimes("sqlite:data/rapport.db");
        assert_eq!(idle, Some(Duration::from_secs(300)));
        assert_eq!(lifetime, Some(Duration::from_secs(600)));
    }

    #[tokio::test]
    async fn test_ping_fails_without_schema() {
        let store = Store::in_memory().await.unwrap();
        for table in ["friendships", "accounts"] {
            store
                .conn
                .execute_unprepared(&format!("DROP TABLE {table}"))
                .await
                .unwrap();
        }

        assert!(store.ping().await.is_err());
    }

    #[test]
    fn test_is_storage_error() {
        let err = anyhow::Error::new(DbErr::Custom("disk I/O error".to_string()))
            .context("Failed to list accounts");
        assert!(is_storage_error(&err));

        assert!(!is_storage_error(&anyhow::anyhow!("hashing failed")));
    }

    #[test]
    fn test_sql_error_ignores_unrelated_errors() {
        let err = anyhow::anyhow!("something else");
        assert!(sql_error(&err).is_none());
    }
}
