//! Application state wiring services to concrete stores.
//!
//! Services are generic over repository traits; this module pins them to the
//! document-store adapters and builds the conversation handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use grateful_core::conversation::handler::ConversationHandler;
use grateful_core::conversation::state::ConversationStore;
use grateful_core::conversation::transport::ChannelSink;
use grateful_core::repository::document::{DocumentGratitudeRepository, DocumentUserRepository};
use grateful_core::service::gratitude::GratitudeService;
use grateful_core::service::user::UserService;
use grateful_core::storage::document_store::DocumentStore;
use grateful_infra::config::{RuntimeConfig, load_runtime_config, prepare_dirs, resolve_data_dir};
use grateful_infra::sqlite::document::SqliteDocumentStore;
use grateful_infra::sqlite::pool::DatabasePool;
use grateful_types::config::GratefulConfig;

/// Conversation handler over any document store, replying through a channel.
pub type DocumentHandler<D> =
    ConversationHandler<DocumentGratitudeRepository<D>, DocumentUserRepository<D>, ChannelSink>;

pub type ConcreteGratitudeService = GratitudeService<DocumentGratitudeRepository<SqliteDocumentStore>>;

/// State for commands that read the persistent store.
pub struct AppState {
    pub config: RuntimeConfig,
    pub db_pool: DatabasePool,
    pub store: SqliteDocumentStore,
    pub gratitude_service: Arc<ConcreteGratitudeService>,
}

impl AppState {
    /// Load configuration, open the database, and wire services.
    pub async fn init(config: RuntimeConfig) -> anyhow::Result<Self> {
        let timeout = config.settings.storage.timeout();
        let db_pool = DatabasePool::open(&config.storage_path, timeout)
            .await
            .with_context(|| format!("failed to open database at {}", config.storage_path.display()))?;

        let store = SqliteDocumentStore::new(db_pool.clone());
        let gratitude_service = GratitudeService::new(DocumentGratitudeRepository::new(store.clone()))
            .with_storage_timeout(timeout);

        Ok(Self {
            config,
            db_pool,
            store,
            gratitude_service: Arc::new(gratitude_service),
        })
    }
}

/// Resolve the data directory, read configuration, and create directories.
pub async fn load_config(data_dir: Option<PathBuf>) -> anyhow::Result<RuntimeConfig> {
    let data_dir = data_dir.unwrap_or_else(resolve_data_dir);
    let config = load_runtime_config(data_dir)
        .await
        .context("invalid configuration")?;
    prepare_dirs(&config).await?;
    Ok(config)
}

/// Build a conversation handler over `store`.
pub fn build_handler<D>(
    store: D,
    settings: &GratefulConfig,
    sink: ChannelSink,
    conversations: ConversationStore,
) -> DocumentHandler<D>
where
    D: DocumentStore + Clone,
{
    let timeout = settings.storage.timeout();
    let gratitude = GratitudeService::new(DocumentGratitudeRepository::new(store.clone()))
        .with_storage_timeout(timeout);
    let users = UserService::new(DocumentUserRepository::new(store)).with_storage_timeout(timeout);

    ConversationHandler::new(gratitude, users, sink, conversations)
        .with_history_limit(settings.conversation.history_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grateful_core::storage::memory::InMemoryDocumentStore;
    use grateful_types::conversation::InboundEvent;
    use grateful_types::gratitude::UserId;

    #[tokio::test]
    async fn test_build_handler_round_trip() {
        let store = InMemoryDocumentStore::new();
        let (sink, mut rx) = ChannelSink::channel();
        let handler = build_handler(
            store.clone(),
            &GratefulConfig::default(),
            sink,
            ConversationStore::new(),
        );

        handler.handle(InboundEvent::start(42)).await;
        handler.handle(InboundEvent::message(42, "  my family  ")).await;

        let entries = handler
            .gratitude()
            .recent_entries(&UserId::from(42), None)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "my family");
        assert_eq!(store.count("users").await.unwrap(), 1);

        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_app_state_opens_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path().to_path_buf())).await.unwrap();
        let state = AppState::init(config).await.unwrap();

        assert!(state.config.storage_path.starts_with(dir.path()));
        assert_eq!(state.store.count("gratitude_entries").await.unwrap(), 0);
        state.db_pool.close().await;
    }
}
