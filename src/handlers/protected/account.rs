use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::database::Account;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /account/:id - Fetch the gated account
pub async fn account_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Account> {
    let account = state.accounts.get_account(id).await?;
    Ok(ApiResponse::success(account))
}

/// DELETE /account/:id - Remove the gated account
pub async fn account_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Value> {
    state.accounts.delete_account(id).await?;
    Ok(ApiResponse::success(json!({ "deleted:": id })))
}
