use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::account_number::allocate_account_number;
use crate::auth::password::{AuthError, PasswordHasher};

/// Stored account row. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    #[serde(rename = "createdat")]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub encrypted_password: String,
}

/// Account that has not been stored yet, so it has no id.
///
/// The account number is allocated here and carried unchanged into storage.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub encrypted_password: String,
}

impl NewAccount {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: &str,
        hasher: &PasswordHasher,
    ) -> Result<Self, AuthError> {
        let encrypted_password = hasher.hash(password)?;
        Ok(Self::with_hash(first_name, last_name, encrypted_password))
    }

    /// Build from an already hashed password, allocating a fresh number
    pub fn with_hash(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        encrypted_password: String,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: allocate_account_number(),
            balance: 0,
            created_at: Utc::now(),
            encrypted_password,
        }
    }

    pub fn into_account(self, id: i32) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            balance: self.balance,
            created_at: self.created_at,
            encrypted_password: self.encrypted_password,
        }
    }
}
