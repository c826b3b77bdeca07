pub mod config;

use std::sync::Arc;

use parley_store::{InMemoryPersistenceAgent, MessageStore, MongoPersistenceAgent, PersistenceAgent};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Backend, Config, LogFormat, LoggingConfig};

/// Install the global subscriber for the configured level and format
pub fn init_logging(logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(logging.env_filter());

    match logging.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }
}

/// Persistence agent for the configured backend
pub async fn connect_agent(config: &Config) -> anyhow::Result<Arc<dyn PersistenceAgent>> {
    let agent: Arc<dyn PersistenceAgent> = match config.store.backend {
        Backend::Memory => {
            tracing::info!("Using in-memory persistence");
            Arc::new(InMemoryPersistenceAgent::new())
        }
        Backend::Mongodb => {
            tracing::info!("Connecting to MongoDB");
            let agent = MongoPersistenceAgent::connect(
                &config.mongodb_uri,
                &config.mongodb.database,
                &config.mongodb.collection,
            )
            .await?;
            tracing::info!("MongoDB connected");
            Arc::new(agent)
        }
    };
    Ok(agent)
}

/// Build the process-wide store from configuration
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<MessageStore>> {
    let agent = connect_agent(config).await?;
    let store = MessageStore::builder()
        .agent(agent)
        .load_on_startup(config.store.load_on_startup)
        .build()
        .await?;
    Ok(Arc::new(store))
}
