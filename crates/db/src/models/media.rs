//! Row mapping for the `media` table.

use abbreviations_core::abbreviation::Image;
use abbreviations_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MediaRow {
    pub id: DbId,
    pub title: Option<String>,
    pub file_name: String,
    pub created_at: Timestamp,
}

impl From<MediaRow> for Image {
    fn from(row: MediaRow) -> Self {
        Image {
            id: row.id,
            title: row.title,
            file_name: row.file_name,
        }
    }
}
