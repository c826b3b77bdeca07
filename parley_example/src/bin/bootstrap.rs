use anyhow::Result;
use parley_example::{build_store, config::Config, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config.logging);

    tracing::info!("Starting parley message store ({:?} backend)", config.store.backend);

    let store = build_store(&config).await?;

    let total = store.count_total_messages().await;
    tracing::info!(total, "Message store ready");

    match store.get_last_message_index().await {
        Some(last) => tracing::info!(
            message_id = %last.id,
            conversation_id = %last.conversation_id,
            created_at = %last.creation_time,
            "Last message"
        ),
        None => tracing::info!("Store is empty"),
    }

    Ok(())
}
