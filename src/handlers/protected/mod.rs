// handlers/protected/mod.rs - Handlers behind the account gate
//
// Routes here are only reached after `middleware::account_gate` has matched
// the token's account number against the account in the path.
pub mod account;

pub use account::{account_delete, account_get};
