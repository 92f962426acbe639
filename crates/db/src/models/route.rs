//! Row mapping for the `routes` table.

use abbreviations_core::route::Route;
use abbreviations_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RouteRow {
    pub id: DbId,
    pub path: String,
    pub locale: String,
    pub entity_class: String,
    pub entity_id: DbId,
    pub history: bool,
    pub created: Timestamp,
    pub changed: Timestamp,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Route {
            id: Some(row.id),
            path: row.path,
            locale: row.locale,
            entity_class: row.entity_class,
            entity_id: row.entity_id,
            history: row.history,
            created: row.created,
            changed: row.changed,
        }
    }
}
