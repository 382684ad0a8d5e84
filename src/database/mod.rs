pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use models::{Account, NewAccount};
pub use postgres::PostgresStore;
pub use store::{AccountStore, DatabaseError};
