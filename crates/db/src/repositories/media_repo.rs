//! Read access to the `media` table.

use abbreviations_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::MediaRow;

pub struct MediaRepo;

impl MediaRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaRow>, sqlx::Error> {
        sqlx::query_as::<_, MediaRow>(
            "SELECT id, title, file_name, created_at FROM media WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
