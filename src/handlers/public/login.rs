// handlers/public/login.rs - POST /login handler

use axum::extract::State;

use crate::extract::ApiJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{LoginRequest, LoginResponse};

/// POST /login - Exchange account number and password for a session token
///
/// Expected Input:
/// ```json
/// { "number": 30264, "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "number": 30264, "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// An unknown number and a wrong password both answer 401 `failed to login`.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let session = state.accounts.login(payload.number, &payload.password).await?;

    Ok(ApiResponse::success(LoginResponse {
        number: session.number,
        token: session.token,
    }))
}
