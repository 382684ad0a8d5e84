use std::sync::Arc;
use thiserror::Error;

use crate::auth::{AuthError, JwtError, PasswordHasher, TokenService};
use crate::database::{Account, AccountStore, DatabaseError, NewAccount};

/// Attempts made to find a free account number before giving up
pub const MAX_NUMBER_ATTEMPTS: usize = 5;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Credentials(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] JwtError),

    /// Unknown number and wrong password are deliberately indistinguishable
    #[error("failed to login")]
    LoginFailed,

    #[error("no free account number after {0} attempts")]
    NumberExhausted(usize),
}

/// Successful login: the account number and its session token
#[derive(Debug, Clone)]
pub struct Session {
    pub number: i64,
    pub token: String,
}

/// Account operations shared by the HTTP handlers and the seed command
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Hash the password once, then insert with fresh account numbers until the
    /// store accepts one or `MAX_NUMBER_ATTEMPTS` is reached.
    pub async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let encrypted_password = self.hasher.hash_blocking(password.to_string()).await?;

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let account = NewAccount::with_hash(first_name, last_name, encrypted_password.clone());
            let number = account.number;

            match self.store.create_account(account).await {
                Ok(created) => {
                    tracing::info!("Created account {} with number {}", created.id, created.number);
                    return Ok(created);
                }
                Err(DatabaseError::Conflict(_)) => {
                    tracing::warn!(
                        "Account number {} already taken (attempt {}/{})",
                        number,
                        attempt,
                        MAX_NUMBER_ATTEMPTS
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AccountError::NumberExhausted(MAX_NUMBER_ATTEMPTS))
    }

    pub async fn login(&self, number: i64, password: &str) -> Result<Session, AccountError> {
        let account = match self.store.get_account_by_number(number).await {
            Ok(account) => account,
            Err(DatabaseError::NotFound(_)) => {
                tracing::debug!("Login rejected: no account with number {}", number);
                return Err(AccountError::LoginFailed);
            }
            Err(e) => return Err(e.into()),
        };

        let valid = self
            .hasher
            .verify_blocking(account.encrypted_password.clone(), password.to_string())
            .await;
        if !valid {
            tracing::debug!("Login rejected: wrong password for account {}", number);
            return Err(AccountError::LoginFailed);
        }

        let token = self.tokens.issue(&account)?;
        tracing::info!("Account {} logged in", account.number);

        Ok(Session {
            number: account.number,
            token,
        })
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.store.get_accounts().await?)
    }

    pub async fn get_account(&self, id: i32) -> Result<Account, AccountError> {
        Ok(self.store.get_account_by_id(id).await?)
    }

    pub async fn delete_account(&self, id: i32) -> Result<(), AccountError> {
        self.store.delete_account(id).await?;
        tracing::info!("Deleted account {}", id);
        Ok(())
    }
}
