//! In-memory port implementations shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::abbreviation::{Abbreviation, Image};
use crate::domain_event::DomainEvent;
use crate::error::CoreError;
use crate::filters::ListingFilters;
use crate::pagination;
use crate::ports::{
    AbbreviationRepository, DomainEventCollector, MediaLookup, RestoreStore, RestoreTransaction,
    TrashItemRepository,
};
use crate::route::Route;
use crate::trash::{NewTrashItem, TrashItem};
use crate::types::DbId;

pub fn abbreviation(id: DbId, title: &str) -> Abbreviation {
    Abbreviation {
        id: Some(id),
        title: title.to_string(),
        route_path: format!("/abbreviations/{}", title.to_lowercase()),
        ..Abbreviation::new("en")
    }
}

// -- Abbreviations -----------------------------------------------------------

#[derive(Default)]
pub struct InMemoryAbbreviations {
    rows: Mutex<Vec<Abbreviation>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryAbbreviations {
    pub fn insert(&self, abbreviation: Abbreviation) {
        self.rows.lock().unwrap().push(abbreviation);
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn check(&self) -> Result<(), CoreError> {
        match self.failure.lock().unwrap().clone() {
            Some(msg) => Err(CoreError::Internal(msg)),
            None => Ok(()),
        }
    }

    fn matching(&self, locale: &str) -> Vec<Abbreviation> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.locale == locale)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.id);
        rows
    }
}

#[async_trait]
impl AbbreviationRepository for InMemoryAbbreviations {
    async fn find_by_filters(
        &self,
        _filters: &ListingFilters,
        page: u32,
        page_size: Option<u32>,
        limit: Option<u64>,
        locale: &str,
    ) -> Result<Vec<Abbreviation>, CoreError> {
        self.check()?;
        let Some(window) = pagination::page_window(page, page_size, limit) else {
            return Ok(Vec::new());
        };
        Ok(self
            .matching(locale)
            .into_iter()
            .skip(window.offset as usize)
            .take(window.fetch as usize)
            .collect())
    }

    async fn count_by_filters(
        &self,
        _filters: &ListingFilters,
        locale: &str,
    ) -> Result<u64, CoreError> {
        self.check()?;
        Ok(self.matching(locale).len() as u64)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Abbreviation>, CoreError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == Some(id))
            .cloned())
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != Some(id));
        Ok(rows.len() < before)
    }
}

// -- Media -------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryMedia {
    images: Mutex<HashMap<DbId, Image>>,
    lookups: AtomicUsize,
}

impl InMemoryMedia {
    pub fn insert(&self, image: Image) {
        self.images.lock().unwrap().insert(image.id, image);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaLookup for InMemoryMedia {
    async fn find_image(&self, id: DbId) -> Result<Image, CoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.images
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Image", id })
    }
}

// -- Trash -------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryTrash {
    items: Mutex<Vec<TrashItem>>,
}

impl InMemoryTrash {
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl TrashItemRepository for InMemoryTrash {
    async fn create(&self, item: NewTrashItem) -> Result<TrashItem, CoreError> {
        let mut items = self.items.lock().unwrap();
        let stored = TrashItem {
            id: items.len() as DbId + 1,
            resource_key: item.resource_key,
            resource_id: item.resource_id,
            resource_title: item.resource_title,
            restore_data: item.restore_data,
            restore_type: item.restore_type,
            restore_options: item.restore_options,
            resource_security_context: item.resource_security_context,
            resource_security_object_type: item.resource_security_object_type,
            resource_security_object_id: item.resource_security_object_id,
            stored_at: Utc::now(),
        };
        items.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<TrashItem>, CoreError> {
        Ok(self.items.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() < before)
    }
}

// -- Restore store -----------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Committed {
    pub abbreviations: Vec<Abbreviation>,
    pub routes: Vec<Route>,
}

#[derive(Default)]
pub struct InMemoryRestoreStore {
    committed: Arc<Mutex<Committed>>,
}

impl InMemoryRestoreStore {
    /// Add an already committed route, e.g. one owned by another entity.
    pub fn seed_route(&self, route: Route) {
        self.committed.lock().unwrap().routes.push(route);
    }

    pub fn committed(&self) -> Committed {
        self.committed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestoreStore for InMemoryRestoreStore {
    async fn begin(&self) -> Result<Box<dyn RestoreTransaction>, CoreError> {
        Ok(Box::new(InMemoryTransaction {
            committed: Arc::clone(&self.committed),
            staged: Committed::default(),
        }))
    }
}

struct InMemoryTransaction {
    committed: Arc<Mutex<Committed>>,
    staged: Committed,
}

#[async_trait]
impl RestoreTransaction for InMemoryTransaction {
    async fn persist_and_flush_with_id(
        &mut self,
        abbreviation: &Abbreviation,
        id: DbId,
    ) -> Result<Abbreviation, CoreError> {
        let taken = self
            .committed
            .lock()
            .unwrap()
            .abbreviations
            .iter()
            .chain(self.staged.abbreviations.iter())
            .any(|a| a.id == Some(id));
        if taken {
            return Err(CoreError::Conflict(format!("abbreviation id {id} already exists")));
        }

        let now = Utc::now();
        let stored = Abbreviation {
            id: Some(id),
            created_at: Some(now),
            updated_at: Some(now),
            ..abbreviation.clone()
        };
        self.staged.abbreviations.push(stored.clone());
        Ok(stored)
    }

    async fn persist_route(&mut self, route: &Route) -> Result<Route, CoreError> {
        let taken = self
            .committed
            .lock()
            .unwrap()
            .routes
            .iter()
            .chain(self.staged.routes.iter())
            .any(|r| r.path == route.path && r.locale == route.locale);
        if taken {
            return Err(CoreError::Conflict(format!(
                "route {} ({}) already exists",
                route.path, route.locale
            )));
        }

        let stored = Route {
            id: Some(self.staged.routes.len() as DbId + 1),
            ..route.clone()
        };
        self.staged.routes.push(stored.clone());
        Ok(stored)
    }

    async fn commit(self: Box<Self>) -> Result<(), CoreError> {
        let mut committed = self.committed.lock().unwrap();
        committed.abbreviations.extend(self.staged.abbreviations);
        committed.routes.extend(self.staged.routes);
        Ok(())
    }
}

// -- Events ------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingCollector {
    pending: Mutex<Vec<Box<dyn DomainEvent>>>,
    dispatched: Mutex<Vec<Box<dyn DomainEvent>>>,
}

impl RecordingCollector {
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn dispatched(&self) -> MutexGuard<'_, Vec<Box<dyn DomainEvent>>> {
        self.dispatched.lock().unwrap()
    }
}

impl DomainEventCollector for RecordingCollector {
    fn collect(&self, event: Box<dyn DomainEvent>) {
        self.pending.lock().unwrap().push(event);
    }

    fn dispatch(&self) {
        let events: Vec<_> = self.pending.lock().unwrap().drain(..).collect();
        self.dispatched.lock().unwrap().extend(events);
    }

    fn clear(&self) {
        self.pending.lock().unwrap().clear();
    }
}
