use async_trait::async_trait;

use crate::error::Result;
use crate::models::Message;

/// Durable side of the message store.
///
/// Implementations own durability only. They are called after the in-memory
/// index has been updated and any error they return is surfaced to the
/// caller of the store unchanged; retries and timeouts belong here, not in
/// the store.
#[async_trait]
pub trait PersistenceAgent: Send + Sync {
    /// Durably persist a newly added message
    async fn write_through(&self, message: &Message) -> Result<()>;

    /// Durably remove a message. Removing a message the backend never saw is
    /// not an error.
    async fn delete_message_through(&self, message: &Message) -> Result<()>;

    /// Every persisted message, in the order it should be replayed at startup
    async fn load_all(&self) -> Result<Vec<Message>>;
}
