#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parley_store::{Message, PersistenceAgent, Result, StoreError};
use uuid::Uuid;

/// Agent that records every call and can be told to fail
#[derive(Default)]
pub struct SpyAgent {
    pub written: Mutex<Vec<Message>>,
    pub deleted: Mutex<Vec<Message>>,
    pub stored: Mutex<Vec<Message>>,
    fail: AtomicBool,
}

impl SpyAgent {
    pub fn with_stored(messages: Vec<Message>) -> Self {
        Self {
            stored: Mutex::new(messages),
            ..Self::default()
        }
    }

    pub fn fail_next_calls(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn written(&self) -> Vec<Message> {
        self.written.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<Message> {
        self.deleted.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Durability("backend unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceAgent for SpyAgent {
    async fn write_through(&self, message: &Message) -> Result<()> {
        self.written.lock().unwrap().push(message.clone());
        self.check()
    }

    async fn delete_message_through(&self, message: &Message) -> Result<()> {
        self.deleted.lock().unwrap().push(message.clone());
        self.check()
    }

    async fn load_all(&self) -> Result<Vec<Message>> {
        self.check()?;
        Ok(self.stored.lock().unwrap().clone())
    }
}

pub fn message_at(conversation_id: Uuid, content: &str, millis: i64) -> Message {
    Message::with_id(
        Uuid::new_v4(),
        conversation_id,
        Uuid::new_v4(),
        content,
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
    )
}
