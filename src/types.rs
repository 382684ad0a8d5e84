/// Request and response bodies of the HTTP API
use serde::{Deserialize, Serialize};

use crate::auth::MAX_PASSWORD_BYTES;
use crate::error::ApiError;

/// Column width of the stored name fields
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [("firstName", &self.first_name), ("lastName", &self.last_name)] {
            if value.chars().count() > MAX_NAME_LEN {
                return Err(ApiError::bad_request(format!(
                    "{} must be at most {} characters",
                    field, MAX_NAME_LEN
                )));
            }
        }
        if self.password.is_empty() {
            return Err(ApiError::bad_request("password must not be empty"));
        }
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(ApiError::bad_request(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub number: i64,
    pub token: String,
}

/// Transfer instruction. Accepted and echoed; balances are not touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub to_account: i64,
    pub amount: i64,
}
