//! Repository for the `abbreviations` table.

use abbreviations_core::abbreviation::{Abbreviation, ENTITY_CLASS};
use abbreviations_core::filters::{CategoryOperator, ListingFilters};
use abbreviations_core::pagination::PageWindow;
use abbreviations_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::abbreviation::AbbreviationRow;
use crate::repositories::RouteRepo;

/// Select list shared by every read, joining the optional image.
const SELECT: &str = "SELECT a.id, a.type, a.locale, a.title, a.name, a.explanation, \
     a.description, a.footer, a.route_path, a.ext, a.image_id, \
     m.title AS image_title, m.file_name AS image_file_name, \
     a.published, a.published_at, a.authored, a.author_id, a.creator_id, a.changer_id, \
     a.created_at, a.updated_at \
     FROM abbreviations a LEFT JOIN media m ON m.id = a.image_id";

/// Provides listing, lookup, id-preserving insert and removal.
pub struct AbbreviationRepo;

impl AbbreviationRepo {
    // ── Listing ───────────────────────────────────────────────────────

    /// Fetch the rows inside `window` that match `filters` in `locale`.
    pub async fn find_by_filters(
        pool: &PgPool,
        filters: &ListingFilters,
        window: PageWindow,
        locale: &str,
    ) -> Result<Vec<AbbreviationRow>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT);
        push_filters(&mut qb, filters, locale);

        qb.push(" ORDER BY ");
        if let Some(column) = filters.sort_by {
            qb.push(format!(
                "a.{} {} NULLS LAST, ",
                column.column(),
                filters.sort_method.as_sql()
            ));
        }
        qb.push("a.id ASC");

        qb.push(" LIMIT ")
            .push_bind(to_i64(window.fetch))
            .push(" OFFSET ")
            .push_bind(to_i64(window.offset));

        qb.build_query_as::<AbbreviationRow>().fetch_all(pool).await
    }

    /// Count the rows matching `filters` in `locale`.
    pub async fn count_by_filters(
        pool: &PgPool,
        filters: &ListingFilters,
        locale: &str,
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM abbreviations a");
        push_filters(&mut qb, filters, locale);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    // ── Lookup ────────────────────────────────────────────────────────

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AbbreviationRow>, sqlx::Error> {
        let query = format!("{SELECT} WHERE a.id = $1");
        sqlx::query_as::<_, AbbreviationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    async fn find_by_id_on(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<AbbreviationRow, sqlx::Error> {
        let query = format!("{SELECT} WHERE a.id = $1");
        sqlx::query_as::<_, AbbreviationRow>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    // ── Writes ────────────────────────────────────────────────────────

    /// Insert `input` under the explicit primary key `id`.
    ///
    /// Fails with a unique violation if `id` is taken. The id sequence is
    /// moved past `id` so later generated keys do not collide with it.
    pub async fn insert_with_id(
        conn: &mut PgConnection,
        input: &Abbreviation,
        id: DbId,
    ) -> Result<AbbreviationRow, sqlx::Error> {
        sqlx::query(
            "INSERT INTO abbreviations
                (id, type, locale, title, name, explanation, description, footer,
                 route_path, ext, image_id, published, published_at, authored,
                 author_id, creator_id, changer_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
        )
        .bind(id)
        .bind(&input.kind)
        .bind(&input.locale)
        .bind(&input.title)
        .bind(&input.name)
        .bind(&input.explanation)
        .bind(&input.description)
        .bind(&input.footer)
        .bind(&input.route_path)
        .bind(&input.ext)
        .bind(input.image_id())
        .bind(input.published)
        .bind(input.published_at)
        .bind(input.authored)
        .bind(input.author_id)
        .bind(input.creator_id)
        .bind(input.changer_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('abbreviations', 'id'), \
             GREATEST((SELECT MAX(id) FROM abbreviations), 1))",
        )
        .execute(&mut *conn)
        .await?;

        Self::find_by_id_on(conn, id).await
    }

    /// Delete an abbreviation and every route pointing at it. Returns `true`
    /// if the abbreviation row was removed.
    pub async fn delete_with_routes(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        RouteRepo::delete_for_entity(&mut *tx, ENTITY_CLASS, id).await?;
        let result = sqlx::query("DELETE FROM abbreviations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Append the `WHERE` clause for locale and category filters.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &ListingFilters, locale: &str) {
    qb.push(" WHERE a.locale = ").push_bind(locale.to_string());

    if filters.categories.is_empty() {
        return;
    }

    let mut categories = filters.categories.clone();
    categories.sort_unstable();
    categories.dedup();

    match filters.category_operator {
        CategoryOperator::Or => {
            qb.push(
                " AND EXISTS (SELECT 1 FROM abbreviation_categories ac \
                 WHERE ac.abbreviation_id = a.id AND ac.category_id = ANY(",
            )
            .push_bind(categories)
            .push("))");
        }
        CategoryOperator::And => {
            let required = categories.len() as i64;
            qb.push(
                " AND (SELECT COUNT(DISTINCT ac.category_id) FROM abbreviation_categories ac \
                 WHERE ac.abbreviation_id = a.id AND ac.category_id = ANY(",
            )
            .push_bind(categories)
            .push(")) = ")
            .push_bind(required);
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
