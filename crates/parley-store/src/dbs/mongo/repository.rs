use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::MongoMessage;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoMessageRepository {
    collection: Collection<MongoMessage>,
}

impl MongoMessageRepository {
    pub fn new(client: &Client, db_name: &str, collection: &str) -> Self {
        let collection = client.database(db_name).collection(collection);
        Self { collection }
    }

    pub async fn insert(&self, message: &MongoMessage) -> Result<()> {
        self.collection.insert_one(message).await?;
        Ok(())
    }

    /// Returns how many documents were removed (0 when the id is unknown)
    pub async fn delete(&self, id: &str) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    /// Highest insertion sequence stored so far
    pub async fn max_seq(&self) -> Result<Option<i64>> {
        let latest = self.collection
            .find_one(doc! {})
            .sort(doc! { "seq": -1 })
            .await?;
        Ok(latest.map(|m| m.seq))
    }

    /// Every stored message in insertion order
    pub async fn find_all(&self) -> Result<Vec<MongoMessage>> {
        let messages = self.collection
            .find(doc! {})
            .sort(doc! { "seq": 1, "created_at": 1, "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }
}
