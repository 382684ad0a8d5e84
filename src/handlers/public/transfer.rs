use crate::extract::ApiJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::TransferRequest;

/// POST /transfer - Accept a transfer request and echo it back.
///
/// Nothing is persisted and no balance changes.
pub async fn transfer_create(ApiJson(payload): ApiJson<TransferRequest>) -> ApiResult<TransferRequest> {
    tracing::info!("Transfer of {} to account {} received", payload.amount, payload.to_account);
    Ok(ApiResponse::success(payload))
}
