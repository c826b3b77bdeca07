use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message posted to a conversation.
///
/// Messages are immutable once built; the store only ever adds or removes
/// whole values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub creation_time: DateTime<Utc>,
}

impl Message {
    /// Build a fresh message stamped with a new id and the current time
    pub fn new(conversation_id: Uuid, author_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            author_id,
            content: content.into(),
            creation_time: Utc::now(),
        }
    }

    pub fn with_id(
        id: Uuid,
        conversation_id: Uuid,
        author_id: Uuid,
        content: impl Into<String>,
        creation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            author_id,
            content: content.into(),
            creation_time,
        }
    }
}
