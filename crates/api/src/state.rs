use std::sync::Arc;

use abbreviations_core::data_provider::AbbreviationsDataProvider;
use abbreviations_core::ports::{
    AbbreviationRepository, JsonArraySerializer, MediaLookup, RestoreStore, TrashItemRepository,
};
use abbreviations_core::trash_handler::AbbreviationsTrashItemHandler;
use abbreviations_db::stores::{
    PgAbbreviationRepository, PgMediaLookup, PgRestoreStore, PgTrashItemRepository,
};
use abbreviations_db::DbPool;
use abbreviations_events::{BufferedEventCollector, EventBus};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything sits behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub data_provider: Arc<AbbreviationsDataProvider>,
    pub abbreviations: Arc<dyn AbbreviationRepository>,
    pub trash_items: Arc<dyn TrashItemRepository>,
    pub media: Arc<dyn MediaLookup>,
    pub restore_store: Arc<dyn RestoreStore>,
    /// Activity events published after successful restores.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Wire the PostgreSQL implementations of every port.
    pub fn new(pool: DbPool, config: ServerConfig, event_bus: Arc<EventBus>) -> Self {
        let abbreviations: Arc<dyn AbbreviationRepository> =
            Arc::new(PgAbbreviationRepository::new(pool.clone()));

        Self {
            data_provider: Arc::new(AbbreviationsDataProvider::new(
                Arc::clone(&abbreviations),
                Arc::new(JsonArraySerializer),
            )),
            abbreviations,
            trash_items: Arc::new(PgTrashItemRepository::new(pool.clone())),
            media: Arc::new(PgMediaLookup::new(pool.clone())),
            restore_store: Arc::new(PgRestoreStore::new(pool.clone())),
            config: Arc::new(config),
            event_bus,
            pool,
        }
    }

    /// A trash handler for one request.
    ///
    /// Each handler gets its own event collector so events collected by
    /// concurrent requests never mix.
    pub fn trash_handler(&self) -> AbbreviationsTrashItemHandler {
        AbbreviationsTrashItemHandler::new(
            Arc::clone(&self.trash_items),
            Arc::clone(&self.media),
            Arc::clone(&self.restore_store),
            Arc::new(BufferedEventCollector::new(Arc::clone(&self.event_bus))),
        )
    }
}
