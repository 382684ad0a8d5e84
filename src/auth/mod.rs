//! Credential handling and session tokens.
//!
//! - `password`: bcrypt hashing and verification of account passwords
//! - `account_number`: allocation of the public account number
//! - `jwt`: issuing and verifying tokens bound to one account number

pub mod account_number;
pub mod jwt;
pub mod password;

pub use account_number::{allocate_account_number, ACCOUNT_NUMBER_LIMIT};
pub use jwt::{Claims, JwtError, TokenService};
pub use password::{AuthError, PasswordHasher, MAX_PASSWORD_BYTES};
