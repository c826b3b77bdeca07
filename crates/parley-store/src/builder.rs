use std::sync::Arc;

use crate::agent::PersistenceAgent;
use crate::error::{Result, StoreError};
use crate::store::MessageStore;

pub struct MessageStoreBuilder {
    agent: Option<Arc<dyn PersistenceAgent>>,
    load_on_startup: bool,
}

impl MessageStoreBuilder {
    pub fn new() -> Self {
        Self {
            agent: None,
            load_on_startup: true,
        }
    }

    pub fn agent(mut self, agent: Arc<dyn PersistenceAgent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Seed the store from the agent's `load_all` when building (default on)
    pub fn load_on_startup(mut self, load: bool) -> Self {
        self.load_on_startup = load;
        self
    }

    pub async fn build(self) -> Result<MessageStore> {
        let agent = self.agent
            .ok_or_else(|| StoreError::Internal("persistence agent is required".to_string()))?;

        if self.load_on_startup {
            MessageStore::bootstrap(agent).await
        } else {
            Ok(MessageStore::new(agent))
        }
    }
}

impl Default for MessageStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
