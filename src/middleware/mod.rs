pub mod auth;
pub mod response;

pub use auth::{account_gate, authorize, Denial};
pub use response::{ApiResponse, ApiResult};
