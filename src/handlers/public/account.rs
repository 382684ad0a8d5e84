use axum::extract::State;

use crate::database::Account;
use crate::extract::ApiJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::CreateAccountRequest;

/// GET /account - List every account
pub async fn account_list(State(state): State<AppState>) -> ApiResult<Vec<Account>> {
    let accounts = state.accounts.list_accounts().await?;
    Ok(ApiResponse::success(accounts))
}

/// POST /account - Create an account with a freshly allocated number
///
/// The response is the stored account; the password hash is never included.
pub async fn account_create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAccountRequest>,
) -> ApiResult<Account> {
    payload.validate()?;

    let account = state
        .accounts
        .create_account(&payload.first_name, &payload.last_name, &payload.password)
        .await?;

    Ok(ApiResponse::success(account))
}
