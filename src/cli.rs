use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::auth::PasswordHasher;
use crate::config::AppConfig;
use crate::database::{AccountStore, MemoryStore, PostgresStore};
use crate::server;
use crate::services::AccountService;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "bank-api")]
#[command(about = "Bank account REST API")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Seed the store with one demo account at startup")]
    pub seed: bool,

    #[arg(long, help = "Keep accounts in process memory instead of PostgreSQL")]
    pub in_memory: bool,

    #[arg(long, help = "Port to listen on (overrides API_PORT)")]
    pub port: Option<u16>,
}

/// Demo account created by `--seed`
const SEED_ACCOUNT: (&str, &str, &str) = ("Obl", "gg", "passwordbreaker");

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    config.validate()?;
    tracing::info!("Starting Bank API in {:?} mode", config.environment);

    let hasher = PasswordHasher::new(config.security.bcrypt_cost)?;
    let store = open_store(&config, cli.in_memory).await?;
    let state = AppState::new(config, store, hasher);

    if cli.seed {
        tracing::info!("Seeding the store");
        seed_accounts(&state.accounts).await?;
    }

    let bind_addr = format!("0.0.0.0:{}", state.config.api.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Bank API listening on http://{}", bind_addr);

    server::serve(listener, state.clone(), server::shutdown_signal()).await?;
    state.store().close().await;
    Ok(())
}

/// Connect and create the schema. Any failure here aborts startup.
async fn open_store(config: &AppConfig, in_memory: bool) -> anyhow::Result<Arc<dyn AccountStore>> {
    if in_memory {
        tracing::warn!("Using in-memory store; accounts are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = PostgresStore::connect(config.database_url()?, &config.database).await?;
    store.init().await?;
    Ok(Arc::new(store))
}

pub async fn seed_accounts(accounts: &AccountService) -> anyhow::Result<()> {
    let (first_name, last_name, password) = SEED_ACCOUNT;
    let account = accounts.create_account(first_name, last_name, password).await?;
    tracing::info!("Seeded account {} with number {}", account.id, account.number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use chrono::Duration;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["bank-api", "--seed", "--in-memory", "--port", "4000"]);
        assert!(cli.seed);
        assert!(cli.in_memory);
        assert_eq!(cli.port, Some(4000));

        let cli = Cli::parse_from(["bank-api"]);
        assert!(!cli.seed);
        assert!(cli.port.is_none());
    }

    #[tokio::test]
    async fn seed_creates_one_loginable_account() {
        let store = Arc::new(MemoryStore::new());
        let accounts = AccountService::new(
            store.clone(),
            PasswordHasher::new(4).unwrap(),
            TokenService::new("seed-secret", Duration::hours(1)),
        );

        seed_accounts(&accounts).await.unwrap();

        let all = store.get_accounts().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name, "Obl");
        assert!(accounts.login(all[0].number, "passwordbreaker").await.is_ok());
    }
}
