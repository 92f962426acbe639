//! Collaborator traits the module calls into.
//!
//! Persistence, media lookup, trash storage and event delivery belong to
//! the host. The `abbreviations-db` and `abbreviations-events` crates
//! provide the production implementations.

use async_trait::async_trait;

use crate::abbreviation::{Abbreviation, Image};
use crate::domain_event::DomainEvent;
use crate::error::CoreError;
use crate::filters::ListingFilters;
use crate::pagination;
use crate::route::Route;
use crate::trash::{NewTrashItem, TrashItem};
use crate::types::DbId;

/// Read access to abbreviations for the listing, plus removal on trash.
#[async_trait]
pub trait AbbreviationRepository: Send + Sync {
    /// One page of abbreviations in `locale` matching `filters`.
    async fn find_by_filters(
        &self,
        filters: &ListingFilters,
        page: u32,
        page_size: Option<u32>,
        limit: Option<u64>,
        locale: &str,
    ) -> Result<Vec<Abbreviation>, CoreError>;

    /// Total number of abbreviations in `locale` matching `filters`.
    async fn count_by_filters(
        &self,
        filters: &ListingFilters,
        locale: &str,
    ) -> Result<u64, CoreError>;

    /// Whether a page after `page` exists for the same query.
    async fn has_next_page(
        &self,
        filters: &ListingFilters,
        page: u32,
        page_size: Option<u32>,
        limit: Option<u64>,
        locale: &str,
    ) -> Result<bool, CoreError> {
        let count = self.count_by_filters(filters, locale).await?;
        Ok(pagination::has_next_page(count, limit, page, page_size))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Abbreviation>, CoreError>;

    /// Delete an abbreviation together with its routes. Returns `true` if a
    /// row was removed.
    async fn remove(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Lookup into the media subsystem.
#[async_trait]
pub trait MediaLookup: Send + Sync {
    /// Fails with [`CoreError::NotFound`] when no image has this id.
    async fn find_image(&self, id: DbId) -> Result<Image, CoreError>;
}

/// Storage for soft-deleted resources.
#[async_trait]
pub trait TrashItemRepository: Send + Sync {
    async fn create(&self, item: NewTrashItem) -> Result<TrashItem, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<TrashItem>, CoreError>;

    async fn remove(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Opens the write transaction a restore runs in.
#[async_trait]
pub trait RestoreStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn RestoreTransaction>, CoreError>;
}

/// Pending restore writes. Dropping the transaction without calling
/// [`commit`](RestoreTransaction::commit) discards them.
#[async_trait]
pub trait RestoreTransaction: Send {
    /// Insert `abbreviation` under `id` instead of a generated key. An id
    /// already in use fails with [`CoreError::Conflict`].
    async fn persist_and_flush_with_id(
        &mut self,
        abbreviation: &Abbreviation,
        id: DbId,
    ) -> Result<Abbreviation, CoreError>;

    async fn persist_route(&mut self, route: &Route) -> Result<Route, CoreError>;

    async fn commit(self: Box<Self>) -> Result<(), CoreError>;
}

/// Fire-and-forget sink for domain events.
///
/// Events are buffered by `collect` and only delivered on `dispatch`, so a
/// failed operation can drop them with `clear`.
pub trait DomainEventCollector: Send + Sync {
    fn collect(&self, event: Box<dyn DomainEvent>);

    fn dispatch(&self);

    fn clear(&self);
}

/// Turns an abbreviation into the flat map resource items expose.
pub trait ArraySerializer: Send + Sync {
    fn serialize(&self, abbreviation: &Abbreviation) -> serde_json::Value;
}

/// [`ArraySerializer`] backed by the entity's serde representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArraySerializer;

impl ArraySerializer for JsonArraySerializer {
    fn serialize(&self, abbreviation: &Abbreviation) -> serde_json::Value {
        serde_json::to_value(abbreviation).unwrap_or(serde_json::Value::Null)
    }
}
