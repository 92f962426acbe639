//! PostgreSQL implementations of the core ports.

use abbreviations_core::abbreviation::{Abbreviation, Image};
use abbreviations_core::error::CoreError;
use abbreviations_core::filters::ListingFilters;
use abbreviations_core::pagination;
use abbreviations_core::ports::{
    AbbreviationRepository, MediaLookup, RestoreStore, RestoreTransaction, TrashItemRepository,
};
use abbreviations_core::route::Route;
use abbreviations_core::trash::{NewTrashItem, TrashItem};
use abbreviations_core::types::DbId;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::repositories::{AbbreviationRepo, MediaRepo, RouteRepo, TrashItemRepo};

/// Translate a sqlx error into the domain taxonomy.
///
/// Unique violations (`23505`) become [`CoreError::Conflict`]; anything
/// else is internal.
pub fn map_db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            ));
        }
    }
    CoreError::Internal(err.to_string())
}

// ---------------------------------------------------------------------------
// Abbreviations
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgAbbreviationRepository {
    pool: PgPool,
}

impl PgAbbreviationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AbbreviationRepository for PgAbbreviationRepository {
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
        let rows = AbbreviationRepo::find_by_filters(&self.pool, filters, window, locale)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Abbreviation::from).collect())
    }

    async fn count_by_filters(
        &self,
        filters: &ListingFilters,
        locale: &str,
    ) -> Result<u64, CoreError> {
        let count = AbbreviationRepo::count_by_filters(&self.pool, filters, locale)
            .await
            .map_err(map_db_error)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Abbreviation>, CoreError> {
        let row = AbbreviationRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(Abbreviation::from))
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        AbbreviationRepo::delete_with_routes(&self.pool, id)
            .await
            .map_err(map_db_error)
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgMediaLookup {
    pool: PgPool,
}

impl PgMediaLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaLookup for PgMediaLookup {
    async fn find_image(&self, id: DbId) -> Result<Image, CoreError> {
        MediaRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?
            .map(Image::from)
            .ok_or(CoreError::NotFound { entity: "Image", id })
    }
}

// ---------------------------------------------------------------------------
// Trash items
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgTrashItemRepository {
    pool: PgPool,
}

impl PgTrashItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrashItemRepository for PgTrashItemRepository {
    async fn create(&self, item: NewTrashItem) -> Result<TrashItem, CoreError> {
        TrashItemRepo::create(&self.pool, &item)
            .await
            .map(TrashItem::from)
            .map_err(map_db_error)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<TrashItem>, CoreError> {
        TrashItemRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(TrashItem::from))
            .map_err(map_db_error)
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        TrashItemRepo::delete(&self.pool, id)
            .await
            .map_err(map_db_error)
    }
}

// ---------------------------------------------------------------------------
// Restore transaction
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgRestoreStore {
    pool: PgPool,
}

impl PgRestoreStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestoreStore for PgRestoreStore {
    async fn begin(&self) -> Result<Box<dyn RestoreTransaction>, CoreError> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgRestoreTransaction { tx }))
    }
}

/// Restore writes inside one database transaction. sqlx rolls the
/// transaction back when it is dropped uncommitted.
pub struct PgRestoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RestoreTransaction for PgRestoreTransaction {
    async fn persist_and_flush_with_id(
        &mut self,
        abbreviation: &Abbreviation,
        id: DbId,
    ) -> Result<Abbreviation, CoreError> {
        AbbreviationRepo::insert_with_id(&mut *self.tx, abbreviation, id)
            .await
            .map(Abbreviation::from)
            .map_err(map_db_error)
    }

    async fn persist_route(&mut self, route: &Route) -> Result<Route, CoreError> {
        RouteRepo::create(&mut *self.tx, route)
            .await
            .map(Route::from)
            .map_err(map_db_error)
    }

    async fn commit(self: Box<Self>) -> Result<(), CoreError> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
