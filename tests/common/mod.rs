#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use bank_api::auth::PasswordHasher;
use bank_api::database::MemoryStore;
use bank_api::{server, AppConfig, AppState};

pub const TOKEN_HEADER: &str = "x-jwt-token";
pub const JWT_SECRET: &str = "integration-secret";

pub struct TestServer {
    pub base_url: String,
    pub state: AppState,
    pub client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

/// Start the API in-process on a free port, backed by an empty in-memory store
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(|_| {}).await
}

/// Like `spawn_server`, with a hook to adjust the test config first
pub async fn spawn_server_with(configure: impl FnOnce(&mut AppConfig)) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let mut config = AppConfig::development();
    config.security.jwt_secret = JWT_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    configure(&mut config);

    let state = AppState::new(
        config,
        Arc::new(MemoryStore::new()),
        PasswordHasher::new(4)?,
    );

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(server::serve(listener, state.clone(), async move {
        let _ = rx.await;
    }));

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
        client: reqwest::Client::new(),
        _shutdown: tx,
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_account(&self, first: &str, last: &str, password: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/account"))
            .json(&json!({ "firstName": first, "lastName": last, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "create failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn login(&self, number: i64, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "number": number, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing token")
    }

    /// Create an account and log in, returning (id, number, token)
    pub async fn account_with_token(&self, password: &str) -> Result<(i64, i64, String)> {
        let account = self.create_account("A", "B", password).await?;
        let id = account["id"].as_i64().context("missing id")?;
        let number = account["number"].as_i64().context("missing number")?;
        let token = self.login(number, password).await?;
        Ok((id, number, token))
    }
}
