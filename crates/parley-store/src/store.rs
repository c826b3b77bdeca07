use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::agent::PersistenceAgent;
use crate::builder::MessageStoreBuilder;
use crate::error::{Result, StoreError};
use crate::index::MessageIndex;
use crate::models::Message;

/// Write-through in-memory index of every message.
///
/// Reads are served from memory. Every mutation updates the in-memory index
/// and then awaits the persistence agent before returning. A single lock
/// covers the global sequence and the conversation index; writers keep the
/// write guard across the durable call, so the durable order matches the
/// in-memory order and readers never see a half-applied change.
///
/// Construct one per process and share it behind an `Arc`.
pub struct MessageStore {
    index: RwLock<MessageIndex>,
    agent: Arc<dyn PersistenceAgent>,
}

impl MessageStore {
    /// Empty store writing through to `agent`
    pub fn new(agent: Arc<dyn PersistenceAgent>) -> Self {
        Self {
            index: RwLock::new(MessageIndex::default()),
            agent,
        }
    }

    /// Store seeded with everything `agent` has persisted
    pub async fn bootstrap(agent: Arc<dyn PersistenceAgent>) -> Result<Self> {
        let messages = agent.load_all().await?;
        let store = Self::new(agent);
        store.set_messages(messages).await;
        Ok(store)
    }

    pub fn builder() -> MessageStoreBuilder {
        MessageStoreBuilder::new()
    }

    /// Replace the whole in-memory state with `messages`, in order.
    ///
    /// Nothing is written through: the messages are assumed to be durable
    /// already.
    pub async fn set_messages(&self, messages: Vec<Message>) {
        let rebuilt = MessageIndex::from_messages(messages);
        let total = rebuilt.len();

        *self.index.write().await = rebuilt;

        tracing::debug!(total, "Message index loaded");
    }

    pub async fn get_message_by_id(&self, id: Uuid) -> Option<Message> {
        self.index.read().await.get(&id).cloned()
    }

    /// Messages of one conversation in the order they were added
    pub async fn get_messages_in_conversation(&self, conversation_id: Uuid) -> Vec<Message> {
        self.index
            .read()
            .await
            .conversation(&conversation_id)
            .cloned()
            .collect()
    }

    /// Messages written by one author, in global add order
    pub async fn get_messages_by_author(&self, author_id: Uuid) -> Vec<Message> {
        self.index
            .read()
            .await
            .by_author(author_id)
            .cloned()
            .collect()
    }

    pub async fn count_total_messages(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn count_messages_in_conversation(&self, conversation_id: Uuid) -> usize {
        self.index.read().await.conversation_len(&conversation_id)
    }

    /// Most recently added message still present, across all conversations
    pub async fn get_last_message_index(&self) -> Option<Message> {
        self.index.read().await.last().cloned()
    }

    pub async fn get_last_message_in_conversation(&self, conversation_id: Uuid) -> Option<Message> {
        self.index
            .read()
            .await
            .last_in_conversation(&conversation_id)
            .cloned()
    }

    /// Index `message` and write it through.
    ///
    /// Every accepted message is written through exactly once. A message
    /// whose id is already present is the exception: it is rejected with
    /// [`StoreError::DuplicateMessage`] before anything is touched, so
    /// `write_through` is never called for it. If the durable write fails
    /// the error is returned and the message stays indexed.
    pub async fn add_message(&self, message: Message) -> Result<()> {
        let mut index = self.index.write().await;

        if !index.insert(message.clone()) {
            tracing::warn!(message_id = %message.id, "Rejected message with duplicate id");
            return Err(StoreError::DuplicateMessage(message.id));
        }

        tracing::debug!(
            message_id = %message.id,
            conversation_id = %message.conversation_id,
            total = index.len(),
            "Message added"
        );

        if let Err(e) = self.agent.write_through(&message).await {
            tracing::error!(message_id = %message.id, "Write-through failed: {}", e);
            return Err(e);
        }

        Ok(())
    }

    /// Drop `message` from the index and delete it durably.
    ///
    /// The durable delete is issued even when the message is not indexed.
    pub async fn delete_message(&self, message: &Message) -> Result<()> {
        let mut index = self.index.write().await;

        let removed = index.remove(&message.id).is_some();
        tracing::debug!(
            message_id = %message.id,
            removed,
            total = index.len(),
            "Message deleted"
        );

        if let Err(e) = self.agent.delete_message_through(message).await {
            tracing::error!(message_id = %message.id, "Delete-through failed: {}", e);
            return Err(e);
        }

        Ok(())
    }
}
