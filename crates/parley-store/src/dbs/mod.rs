pub mod memory;

#[cfg(feature = "mongodb")]
pub mod mongo;

pub use memory::InMemoryPersistenceAgent;

#[cfg(feature = "mongodb")]
pub use mongo::MongoPersistenceAgent;
