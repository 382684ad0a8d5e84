use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejection is rendered in the `{"error": ...}` envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
