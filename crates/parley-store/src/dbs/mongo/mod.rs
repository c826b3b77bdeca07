pub mod client;
pub mod models;
pub mod repository;

pub use client::MongoPersistenceAgent;
pub use models::MongoMessage;
pub use repository::MongoMessageRepository;
