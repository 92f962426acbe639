//! Row mapping for the `abbreviations` table.

use abbreviations_core::abbreviation::{Abbreviation, Image};
use abbreviations_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An abbreviation row joined with its (optional) media row.
#[derive(Debug, Clone, FromRow)]
pub struct AbbreviationRow {
    pub id: DbId,
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub locale: String,
    pub title: String,
    pub name: Option<String>,
    pub explanation: Option<String>,
    pub description: Option<String>,
    pub footer: Option<String>,
    pub route_path: String,
    pub ext: Option<serde_json::Value>,
    pub image_id: Option<DbId>,
    pub image_title: Option<String>,
    pub image_file_name: Option<String>,
    pub published: bool,
    pub published_at: Option<Timestamp>,
    pub authored: Option<Timestamp>,
    pub author_id: Option<DbId>,
    pub creator_id: Option<DbId>,
    pub changer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AbbreviationRow> for Abbreviation {
    fn from(row: AbbreviationRow) -> Self {
        let image = match (row.image_id, row.image_file_name) {
            (Some(id), Some(file_name)) => Some(Image {
                id,
                title: row.image_title,
                file_name,
            }),
            _ => None,
        };

        Abbreviation {
            id: Some(row.id),
            kind: row.kind,
            locale: row.locale,
            title: row.title,
            name: row.name,
            explanation: row.explanation,
            description: row.description,
            footer: row.footer,
            route_path: row.route_path,
            ext: row.ext.unwrap_or_default(),
            image,
            published: row.published,
            published_at: row.published_at,
            authored: row.authored,
            author_id: row.author_id,
            creator_id: row.creator_id,
            changer_id: row.changer_id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
