//! Trash integration for abbreviations.
//!
//! `store` turns an abbreviation into a trash item carrying a flat
//! snapshot; `restore` rebuilds the entity from that snapshot under its
//! original id, recreates its route and emits a restored event.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::abbreviation::{
    Abbreviation, EDIT_FORM_VIEW, ENTITY_CLASS, RESOURCE_KEY, SECURITY_CONTEXT,
};
use crate::domain_event::AbbreviationRestoredEvent;
use crate::error::CoreError;
use crate::ports::{DomainEventCollector, MediaLookup, RestoreStore, TrashItemRepository};
use crate::route::{Route, RESTORE_ROUTE_LOCALE};
use crate::snapshot::Snapshot;
use crate::trash::{NewTrashItem, RestoreConfiguration, TrashItem};
use crate::types::DbId;

pub struct AbbreviationsTrashItemHandler {
    trash_items: Arc<dyn TrashItemRepository>,
    media: Arc<dyn MediaLookup>,
    restore_store: Arc<dyn RestoreStore>,
    events: Arc<dyn DomainEventCollector>,
}

impl AbbreviationsTrashItemHandler {
    pub fn new(
        trash_items: Arc<dyn TrashItemRepository>,
        media: Arc<dyn MediaLookup>,
        restore_store: Arc<dyn RestoreStore>,
        events: Arc<dyn DomainEventCollector>,
    ) -> Self {
        Self {
            trash_items,
            media,
            restore_store,
            events,
        }
    }

    pub fn resource_key() -> &'static str {
        RESOURCE_KEY
    }

    /// Move `resource` into the trash storage.
    ///
    /// `options` are stored alongside the snapshot and handed back to the
    /// restore UI unchanged.
    pub async fn store(
        &self,
        resource: &Abbreviation,
        options: serde_json::Value,
    ) -> Result<TrashItem, CoreError> {
        let id = resource.id.ok_or_else(|| {
            CoreError::Validation("cannot trash an abbreviation that was never persisted".into())
        })?;
        let restore_data = Snapshot::capture(resource).to_restore_data()?;

        let item = self
            .trash_items
            .create(NewTrashItem {
                resource_key: RESOURCE_KEY.to_string(),
                resource_id: id.to_string(),
                resource_title: resource.title.clone(),
                restore_data,
                restore_type: None,
                restore_options: options,
                resource_security_context: Some(SECURITY_CONTEXT.to_string()),
                resource_security_object_type: None,
                resource_security_object_id: None,
            })
            .await?;

        tracing::info!(abbreviation_id = id, trash_item_id = item.id, "Abbreviation moved to trash");
        Ok(item)
    }

    /// Rebuild the abbreviation held by `trash_item`.
    ///
    /// The entity is inserted under its original id and a new route is
    /// created for its path, both in one restore transaction. The restored
    /// event is only dispatched once that transaction has committed.
    pub async fn restore(
        &self,
        trash_item: &TrashItem,
        _restore_form_data: &serde_json::Value,
    ) -> Result<Abbreviation, CoreError> {
        match self.restore_inner(trash_item).await {
            Ok(abbreviation) => {
                self.events.dispatch();
                tracing::info!(
                    abbreviation_id = ?abbreviation.id,
                    trash_item_id = trash_item.id,
                    "Abbreviation restored from trash"
                );
                Ok(abbreviation)
            }
            Err(e) => {
                self.events.clear();
                Err(e)
            }
        }
    }

    async fn restore_inner(&self, trash_item: &TrashItem) -> Result<Abbreviation, CoreError> {
        let id = parse_resource_id(&trash_item.resource_id)?;
        let snapshot = Snapshot::from_restore_data(&trash_item.restore_data)?;

        let mut abbreviation = snapshot.to_abbreviation(restore_locale(trash_item))?;
        if let Some(image_id) = snapshot.image_id {
            abbreviation.image = Some(self.media.find_image(image_id).await?);
        }
        abbreviation.id = Some(id);

        self.events.collect(Box::new(AbbreviationRestoredEvent::new(
            abbreviation.clone(),
            trash_item.restore_data.clone(),
        )));

        let mut tx = self.restore_store.begin().await?;
        let restored = tx.persist_and_flush_with_id(&abbreviation, id).await?;
        tx.persist_route(&Route::new(
            restored.route_path.clone(),
            RESTORE_ROUTE_LOCALE,
            ENTITY_CLASS,
            id,
        ))
        .await?;
        tx.commit().await?;

        Ok(restored)
    }

    pub fn configuration(&self) -> RestoreConfiguration {
        RestoreConfiguration {
            form: None,
            view: Some(EDIT_FORM_VIEW.to_string()),
            result_to_view: BTreeMap::from([("id".to_string(), "id".to_string())]),
        }
    }
}

/// Locale recorded in the restore options at store time. Items stored
/// without one come back in the route locale.
fn restore_locale(trash_item: &TrashItem) -> &str {
    trash_item
        .restore_options
        .get("locale")
        .and_then(serde_json::Value::as_str)
        .filter(|locale| !locale.is_empty())
        .unwrap_or(RESTORE_ROUTE_LOCALE)
}

fn parse_resource_id(resource_id: &str) -> Result<DbId, CoreError> {
    resource_id.trim().parse().map_err(|_| {
        CoreError::MalformedSnapshot(format!("resource id '{resource_id}' is not an integer"))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
