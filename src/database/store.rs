use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Account, NewAccount};

/// Errors surfaced by any `AccountStore` implementation
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique constraint (the account number) was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence capability for accounts.
///
/// Implementations must reject a second account with the same `number`
/// using `DatabaseError::Conflict`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create_account(&self, account: NewAccount) -> Result<Account, DatabaseError>;

    async fn delete_account(&self, id: i32) -> Result<(), DatabaseError>;

    /// Updates the profile fields. Number, balance and credentials are left alone.
    async fn update_account(&self, account: &Account) -> Result<Account, DatabaseError>;

    async fn get_accounts(&self) -> Result<Vec<Account>, DatabaseError>;

    async fn get_account_by_id(&self, id: i32) -> Result<Account, DatabaseError>;

    async fn get_account_by_number(&self, number: i64) -> Result<Account, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    /// Release connections on shutdown
    async fn close(&self) {}
}
