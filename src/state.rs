use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::AccountStore;
use crate::services::AccountService;

/// Shared, read-only request state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        let tokens = TokenService::from_config(&config.security);
        Self {
            accounts: AccountService::new(store, hasher, tokens),
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        self.accounts.store()
    }

    pub fn tokens(&self) -> &TokenService {
        self.accounts.tokens()
    }

    pub fn token_header(&self) -> &str {
        &self.config.security.token_header
    }
}
