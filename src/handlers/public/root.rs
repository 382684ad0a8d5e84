use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Service description
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let gated = format!(
        "GET, DELETE /account/:id (token in {} header)",
        state.token_header()
    );

    Json(json!({
        "name": "Bank API (Rust)",
        "version": version,
        "endpoints": {
            "login": "POST /login (public)",
            "accounts": "GET, POST /account (public)",
            "account": gated,
            "transfer": "POST /transfer (public)",
            "health": "GET /health (public)",
        }
    }))
}

/// GET /health - Liveness plus a store round trip
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    if let Err(e) = state.store().health_check().await {
        tracing::error!("Health check failed: {}", e);
        return Err(ApiError::service_unavailable("Database unavailable"));
    }

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
