//! Shared harness for the HTTP integration tests.
//!
//! The router runs against in-memory implementations of the core ports, so
//! no test needs a database. The pool in [`AppState`] is lazy and points at
//! a closed port; only the health check ever touches it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use abbreviations_api::config::ServerConfig;
use abbreviations_api::router::build_app_router;
use abbreviations_api::state::AppState;
use abbreviations_core::abbreviation::{Abbreviation, Image};
use abbreviations_core::data_provider::AbbreviationsDataProvider;
use abbreviations_core::error::CoreError;
use abbreviations_core::filters::ListingFilters;
use abbreviations_core::pagination;
use abbreviations_core::ports::{
    AbbreviationRepository, JsonArraySerializer, MediaLookup, RestoreStore, RestoreTransaction,
    TrashItemRepository,
};
use abbreviations_core::route::Route;
use abbreviations_core::trash::{NewTrashItem, TrashItem};
use abbreviations_core::types::DbId;
use abbreviations_events::EventBus;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Tables {
    pub abbreviations: Vec<Abbreviation>,
    pub routes: Vec<Route>,
    pub trash_items: Vec<TrashItem>,
    pub images: Vec<Image>,
}

/// All tables behind one lock, shared by every port implementation.
#[derive(Clone, Default)]
pub struct Backend {
    tables: Arc<Mutex<Tables>>,
}

impl Backend {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn insert_abbreviation(&self, abbreviation: Abbreviation) {
        self.tables().abbreviations.push(abbreviation);
    }

    pub fn insert_image(&self, image: Image) {
        self.tables().images.push(image);
    }

    pub fn abbreviation(&self, id: DbId) -> Option<Abbreviation> {
        self.tables()
            .abbreviations
            .iter()
            .find(|a| a.id == Some(id))
            .cloned()
    }
}

struct Abbreviations(Backend);

#[async_trait]
impl AbbreviationRepository for Abbreviations {
    async fn find_by_filters(
        &self,
        filters: &ListingFilters,
        page: u32,
        page_size: Option<u32>,
        limit: Option<u64>,
        locale: &str,
    ) -> Result<Vec<Abbreviation>, CoreError> {
        let Some(window) = pagination::page_window(page, page_size, limit) else {
            return Ok(Vec::new());
        };
        let mut rows = matching(&self.0.tables(), filters, locale);
        rows.sort_by_key(|a| a.id);
        Ok(rows
            .into_iter()
            .skip(window.offset as usize)
            .take(window.fetch as usize)
            .collect())
    }

    async fn count_by_filters(
        &self,
        filters: &ListingFilters,
        locale: &str,
    ) -> Result<u64, CoreError> {
        Ok(matching(&self.0.tables(), filters, locale).len() as u64)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Abbreviation>, CoreError> {
        Ok(self.0.abbreviation(id))
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.0.tables();
        let before = tables.abbreviations.len();
        tables.abbreviations.retain(|a| a.id != Some(id));
        tables
            .routes
            .retain(|r| !(r.entity_class == "Abbreviation" && r.entity_id == id));
        Ok(tables.abbreviations.len() < before)
    }
}

/// Categories are not modelled in memory; only the locale filters.
fn matching(tables: &Tables, _filters: &ListingFilters, locale: &str) -> Vec<Abbreviation> {
    tables
        .abbreviations
        .iter()
        .filter(|a| a.locale == locale)
        .cloned()
        .collect()
}

struct Media(Backend);

#[async_trait]
impl MediaLookup for Media {
    async fn find_image(&self, id: DbId) -> Result<Image, CoreError> {
        self.0
            .tables()
            .images
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Image", id })
    }
}

struct Trash(Backend);

#[async_trait]
impl TrashItemRepository for Trash {
    async fn create(&self, item: NewTrashItem) -> Result<TrashItem, CoreError> {
        let mut tables = self.0.tables();
        let id = tables.trash_items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let stored = TrashItem {
            id,
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
        tables.trash_items.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<TrashItem>, CoreError> {
        Ok(self.0.tables().trash_items.iter().find(|i| i.id == id).cloned())
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.0.tables();
        let before = tables.trash_items.len();
        tables.trash_items.retain(|i| i.id != id);
        Ok(tables.trash_items.len() < before)
    }
}

struct Restores(Backend);

#[async_trait]
impl RestoreStore for Restores {
    async fn begin(&self) -> Result<Box<dyn RestoreTransaction>, CoreError> {
        Ok(Box::new(StagedRestore {
            backend: self.0.clone(),
            abbreviations: Vec::new(),
            routes: Vec::new(),
        }))
    }
}

/// Writes are staged and only applied on commit, like a database
/// transaction that rolls back when dropped.
struct StagedRestore {
    backend: Backend,
    abbreviations: Vec<Abbreviation>,
    routes: Vec<Route>,
}

#[async_trait]
impl RestoreTransaction for StagedRestore {
    async fn persist_and_flush_with_id(
        &mut self,
        abbreviation: &Abbreviation,
        id: DbId,
    ) -> Result<Abbreviation, CoreError> {
        if self.backend.abbreviation(id).is_some() {
            return Err(CoreError::Conflict(format!(
                "duplicate key value violates unique constraint \"abbreviations_pkey\" ({id})"
            )));
        }
        let now = Utc::now();
        let stored = Abbreviation {
            id: Some(id),
            created_at: Some(now),
            updated_at: Some(now),
            ..abbreviation.clone()
        };
        self.abbreviations.push(stored.clone());
        Ok(stored)
    }

    async fn persist_route(&mut self, route: &Route) -> Result<Route, CoreError> {
        let taken = self
            .backend
            .tables()
            .routes
            .iter()
            .any(|r| r.path == route.path && r.locale == route.locale);
        if taken {
            return Err(CoreError::Conflict(format!(
                "route {} already exists",
                route.path
            )));
        }
        let stored = Route {
            id: Some(self.routes.len() as DbId + 1),
            ..route.clone()
        };
        self.routes.push(stored.clone());
        Ok(stored)
    }

    async fn commit(self: Box<Self>) -> Result<(), CoreError> {
        let mut tables = self.backend.tables();
        tables.abbreviations.extend(self.abbreviations);
        tables.routes.extend(self.routes);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        default_locale: "en".to_string(),
    }
}

/// A running test application: the router plus handles to inspect what
/// it did.
pub struct TestApp {
    pub router: Router,
    pub backend: Backend,
    pub event_bus: Arc<EventBus>,
}

/// Build the full router over a fresh in-memory backend.
///
/// Must be called from inside a Tokio runtime (the lazy pool spawns its
/// maintenance task).
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let backend = Backend::default();
    let event_bus = Arc::new(EventBus::default());

    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://abbreviations@127.0.0.1:1/abbreviations")
        .expect("lazy pool from a well-formed URL");

    let abbreviations: Arc<dyn AbbreviationRepository> =
        Arc::new(Abbreviations(backend.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        data_provider: Arc::new(AbbreviationsDataProvider::new(
            Arc::clone(&abbreviations),
            Arc::new(JsonArraySerializer),
        )),
        abbreviations,
        trash_items: Arc::new(Trash(backend.clone())),
        media: Arc::new(Media(backend.clone())),
        restore_store: Arc::new(Restores(backend.clone())),
        event_bus: Arc::clone(&event_bus),
    };

    TestApp {
        router: build_app_router(state, &config),
        backend,
        event_bus,
    }
}

pub fn abbreviation(id: DbId, title: &str) -> Abbreviation {
    Abbreviation {
        id: Some(id),
        title: title.to_string(),
        name: Some(format!("{title} name")),
        explanation: Some(format!("{title} explained")),
        route_path: format!("/abbreviations/{}", title.to_lowercase()),
        published: true,
        ..Abbreviation::new("en")
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, Body::empty()).await
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
