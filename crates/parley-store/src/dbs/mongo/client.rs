use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use mongodb::Client;

use crate::agent::PersistenceAgent;
use crate::dbs::mongo::models::MongoMessage;
use crate::dbs::mongo::repository::MongoMessageRepository;
use crate::error::{Result, StoreError};
use crate::models::Message;

pub const DEFAULT_COLLECTION: &str = "messages";

pub struct MongoPersistenceAgent {
    message_repo: MongoMessageRepository,
    next_seq: AtomicI64,
}

impl MongoPersistenceAgent {
    /// Connect to MongoDB and bind to `database.collection`
    pub async fn connect(mongodb_uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let message_repo = MongoMessageRepository::new(&client, database, collection);
        let next_seq = message_repo.max_seq().await?.map_or(1, |seq| seq + 1);
        tracing::debug!(next_seq, "Resuming insertion sequence");

        Ok(Self {
            message_repo,
            next_seq: AtomicI64::new(next_seq),
        })
    }
}

#[async_trait]
impl PersistenceAgent for MongoPersistenceAgent {
    async fn write_through(&self, message: &Message) -> Result<()> {
        // The store serializes writers, so sequence order is add order
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.message_repo.insert(&MongoMessage::new(message, seq)).await
    }

    async fn delete_message_through(&self, message: &Message) -> Result<()> {
        let deleted = self.message_repo.delete(&message.id.to_string()).await?;
        if deleted == 0 {
            tracing::debug!(message_id = %message.id, "No stored document to delete");
        }
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Message>> {
        let docs = self.message_repo.find_all().await?;
        tracing::info!("Loaded {} messages from MongoDB", docs.len());
        docs.into_iter().map(Message::try_from).collect()
    }
}
