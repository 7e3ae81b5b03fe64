//! Domain service for the account directory.
//!
//! Handles registration, lookup, soft-disable and hard deletion of accounts.
//! Credential hashes never leave this layer.

use thiserror::Error;

use crate::db::Account;

const MAX_USERNAME_LEN: usize = 64;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        if crate::db::is_storage_error(&err) {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(format!("{err:#}"))
        }
    }
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates an account with a salted hash of `password`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Conflict`] if the username is already taken.
    async fn register(&self, username: &str, password: &str) -> Result<Account, AccountError>;

    /// Lists every account, active or not.
    async fn list(&self) -> Result<Vec<Account>, AccountError>;

    async fn get_by_username(&self, username: &str) -> Result<Account, AccountError>;

    async fn get_by_id(&self, id: &str) -> Result<Account, AccountError>;

    /// Marks an account inactive. Disabling twice is not an error.
    async fn disable(&self, username: &str) -> Result<(), AccountError>;

    /// Permanently removes an account and, through the cascade, its friendships.
    async fn delete(&self, username: &str) -> Result<(), AccountError>;

    /// Checks a password against the stored hash of an active account.
    async fn verify_password(&self, username: &str, password: &str)
    -> Result<bool, AccountError>;
}

pub fn validate_username(username: &str) -> Result<&str, AccountError> {
    if username.is_empty() {
        return Err(AccountError::Validation(
            "Username cannot be empty".to_string(),
        ));
    }

    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AccountError::Validation(format!(
            "Username must be {MAX_USERNAME_LEN} characters or less"
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(AccountError::Validation(
            "Username can only contain letters, numbers, dots, hyphens, and underscores"
                .to_string(),
        ));
    }

    Ok(username)
}

pub fn validate_password(password: &str) -> Result<&str, AccountError> {
    if password.is_empty() {
        return Err(AccountError::Validation(
            "Password cannot be empty".to_string(),
        ));
    }
    Ok(password)
}
