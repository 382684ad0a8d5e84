use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::models::{Account, NewAccount};
use crate::database::store::{AccountStore, DatabaseError};

#[derive(Default)]
struct Inner {
    next_id: i32,
    accounts: BTreeMap<i32, Account>,
}

/// Process-local account store with the same contract as the SQL store
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, DatabaseError> {
        let mut inner = self.inner.write().await;

        if inner.accounts.values().any(|a| a.number == account.number) {
            return Err(DatabaseError::Conflict(format!(
                "Account number {} already exists",
                account.number
            )));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let stored = account.into_account(id);
        inner.accounts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_account(&self, id: i32) -> Result<(), DatabaseError> {
        self.inner
            .write()
            .await
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("Account {} not found", id)))
    }

    async fn update_account(&self, account: &Account) -> Result<Account, DatabaseError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .accounts
            .get_mut(&account.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Account {} not found", account.id)))?;

        stored.first_name = account.first_name.clone();
        stored.last_name = account.last_name.clone();
        Ok(stored.clone())
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, DatabaseError> {
        Ok(self.inner.read().await.accounts.values().cloned().collect())
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Account, DatabaseError> {
        self.inner
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("Account {} not found", id)))
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, DatabaseError> {
        self.inner
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.number == number)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("Account with number {} not found", number)))
    }
}
