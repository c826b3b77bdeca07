use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::Message;

/// MongoDB document shape for a message (ids stored as hyphenated strings).
///
/// `created_at` is a BSON date and so only keeps milliseconds; the full
/// sub-second part lives in `created_at_nanos`. `seq` is the insertion
/// sequence assigned by the agent and is what `load_all` replays by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub seq: i64,
    pub conversation_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_nanos: Option<u32>,
}

impl MongoMessage {
    pub fn new(msg: &Message, seq: i64) -> Self {
        Self {
            id: msg.id.to_string(),
            seq,
            conversation_id: msg.conversation_id.to_string(),
            author_id: msg.author_id.to_string(),
            content: msg.content.clone(),
            created_at: msg.creation_time,
            created_at_nanos: Some(msg.creation_time.nanosecond()),
        }
    }

    /// Creation time with the sub-second precision the BSON date dropped.
    /// Documents written without `created_at_nanos` keep millisecond precision.
    fn creation_time(&self) -> Result<DateTime<Utc>> {
        match self.created_at_nanos {
            Some(nanos) => self.created_at.with_nanosecond(nanos).ok_or_else(|| {
                StoreError::Internal(format!("invalid created_at_nanos {} for {}", nanos, self.id))
            }),
            None => Ok(self.created_at),
        }
    }
}

impl TryFrom<MongoMessage> for Message {
    type Error = StoreError;

    fn try_from(doc: MongoMessage) -> Result<Self> {
        let creation_time = doc.creation_time()?;
        Ok(Self {
            id: parse_id(&doc.id)?,
            conversation_id: parse_id(&doc.conversation_id)?,
            author_id: parse_id(&doc.author_id)?,
            content: doc.content,
            creation_time,
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| StoreError::InvalidId(format!("{}: {}", raw, e)))
}
