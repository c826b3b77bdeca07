use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::agent::PersistenceAgent;
use crate::error::Result;
use crate::models::Message;

/// Process-local stand-in for a durable backend.
///
/// Keeps persisted messages in insertion order so `load_all` replays them the
/// way they were written. Nothing survives the process; use it for
/// development and demos.
#[derive(Default)]
pub struct InMemoryPersistenceAgent {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryPersistenceAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent that already holds `messages`, as if persisted earlier
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[async_trait]
impl PersistenceAgent for InMemoryPersistenceAgent {
    async fn write_through(&self, message: &Message) -> Result<()> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn delete_message_through(&self, message: &Message) -> Result<()> {
        self.messages.write().await.retain(|m| m.id != message.id);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Message>> {
        Ok(self.messages.read().await.clone())
    }
}
