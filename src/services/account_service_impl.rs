//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use sea_orm::SqlErr;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::{Account, Store, sql_error};
use crate::services::account_service::{
    AccountError, AccountService, validate_password, validate_username,
};

pub struct SeaOrmAccountService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn register(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        validate_username(username)?;
        validate_password(password)?;

        let account = self
            .store
            .create_account(username, password, &self.security)
            .await
            .map_err(|e| match sql_error(&e) {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AccountError::Conflict(format!("Username '{username}' is already taken"))
                }
                _ => AccountError::from(e),
            })?;

        info!(account_id = %account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    async fn list(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.store.list_accounts().await?)
    }

    async fn get_by_username(&self, username: &str) -> Result<Account, AccountError> {
        self.store
            .get_account_by_username(username)
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))
    }

    async fn get_by_id(&self, id: &str) -> Result<Account, AccountError> {
        self.store
            .get_account_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn disable(&self, username: &str) -> Result<(), AccountError> {
        if !self.store.disable_account(username).await? {
            return Err(AccountError::NotFound(username.to_string()));
        }

        info!(username = %username, "Account disabled");
        Ok(())
    }

    async fn delete(&self, username: &str) -> Result<(), AccountError> {
        if !self.store.delete_account(username).await? {
            return Err(AccountError::NotFound(username.to_string()));
        }

        info!(username = %username, "Account deleted");
        Ok(())
    }

    async fn verify_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AccountError> {
        Ok(self
            .store
            .verify_account_password(username, password)
            .await?)
    }
}
