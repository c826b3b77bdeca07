//! In-memory message index with write-through persistence.
//!
//! [`MessageStore`] keeps every message of the process in memory, ordered by
//! the time it was added and indexed by id and by conversation. Each add or
//! delete is applied in memory and then pushed to a [`PersistenceAgent`]
//! before the call returns.

pub mod agent;
pub mod builder;
pub mod dbs;
pub mod error;
pub mod models;
pub mod store;

mod index;

pub use agent::PersistenceAgent;
pub use builder::MessageStoreBuilder;
pub use dbs::InMemoryPersistenceAgent;
#[cfg(feature = "mongodb")]
pub use dbs::MongoPersistenceAgent;
pub use error::{Result, StoreError};
pub use models::Message;
pub use store::MessageStore;
