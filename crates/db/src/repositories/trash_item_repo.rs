//! Repository for the `trash_items` table.

use abbreviations_core::trash::NewTrashItem;
use abbreviations_core::types::DbId;
use sqlx::PgPool;

use crate::models::trash_item::TrashItemRow;

const COLUMNS: &str = "id, resource_key, resource_id, resource_title, restore_data, \
     restore_type, restore_options, resource_security_context, \
     resource_security_object_type, resource_security_object_id, stored_at";

pub struct TrashItemRepo;

impl TrashItemRepo {
    pub async fn create(pool: &PgPool, input: &NewTrashItem) -> Result<TrashItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO trash_items
                (resource_key, resource_id, resource_title, restore_data, restore_type,
                 restore_options, resource_security_context, resource_security_object_type,
                 resource_security_object_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrashItemRow>(&query)
            .bind(&input.resource_key)
            .bind(&input.resource_id)
            .bind(&input.resource_title)
            .bind(&input.restore_data)
            .bind(&input.restore_type)
            .bind(&input.restore_options)
            .bind(&input.resource_security_context)
            .bind(&input.resource_security_object_type)
            .bind(&input.resource_security_object_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrashItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trash_items WHERE id = $1");
        sqlx::query_as::<_, TrashItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a trash item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trash_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
