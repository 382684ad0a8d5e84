mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn transfer_is_echoed() -> Result<()> {
    let server = common::spawn_server().await?;
    let payload = json!({ "toAccount": 30264, "amount": 250 });

    let res = server
        .client
        .post(server.url("/transfer"))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, payload);
    Ok(())
}

#[tokio::test]
async fn transfer_leaves_balances_untouched() -> Result<()> {
    let server = common::spawn_server().await?;
    let account = server.create_account("A", "B", "pw1").await?;

    server
        .client
        .post(server.url("/transfer"))
        .json(&json!({ "toAccount": account["number"], "amount": 500 }))
        .send()
        .await?;

    let res = server.client.get(server.url("/account")).send().await?;
    let accounts: Value = res.json().await?;
    assert_eq!(accounts[0]["balance"], 0);
    Ok(())
}

#[tokio::test]
async fn transfer_rejects_malformed_body() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/transfer"))
        .json(&json!({ "toAccount": "not-a-number" }))
        .send()
        .await?;
    assert!(res.status().is_client_error(), "unexpected status: {}", res.status());

    let body: Value = res.json().await?;
    assert!(body["error"].is_string(), "expected error envelope: {}", body);
    Ok(())
}
