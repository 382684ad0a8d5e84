// handlers/public/mod.rs - Public handlers (no token required)
//
// Login, account listing/creation and transfers carry no account gate.
// Listing and transfers being open is a known gap kept on purpose.
pub mod account;
pub mod login;
pub mod root;
pub mod transfer;

pub use account::{account_create, account_list};
pub use login::login;
pub use root::{health, root};
pub use transfer::transfer_create;
