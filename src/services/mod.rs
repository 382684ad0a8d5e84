pub mod account_service;

pub use account_service::{AccountError, AccountService, Session, MAX_NUMBER_ATTEMPTS};
