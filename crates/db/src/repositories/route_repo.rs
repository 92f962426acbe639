//! Repository for the `routes` table.

use abbreviations_core::route::Route;
use abbreviations_core::types::DbId;
use sqlx::PgConnection;

use crate::models::route::RouteRow;

const COLUMNS: &str = "id, path, locale, entity_class, entity_id, history, created, changed";

pub struct RouteRepo;

impl RouteRepo {
    /// Insert a route. A taken `(path, locale)` pair violates
    /// `uq_routes_path_locale`.
    pub async fn create(conn: &mut PgConnection, route: &Route) -> Result<RouteRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO routes (path, locale, entity_class, entity_id, history, created, changed)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RouteRow>(&query)
            .bind(&route.path)
            .bind(&route.locale)
            .bind(&route.entity_class)
            .bind(route.entity_id)
            .bind(route.history)
            .bind(route.created)
            .bind(route.changed)
            .fetch_one(&mut *conn)
            .await
    }

    /// Remove every route (current and history) bound to the entity.
    pub async fn delete_for_entity(
        conn: &mut PgConnection,
        entity_class: &str,
        entity_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM routes WHERE entity_class = $1 AND entity_id = $2")
            .bind(entity_class)
            .bind(entity_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
