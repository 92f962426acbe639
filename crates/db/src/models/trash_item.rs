//! Row mapping for the `trash_items` table.

use abbreviations_core::trash::TrashItem;
use abbreviations_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TrashItemRow {
    pub id: DbId,
    pub resource_key: String,
    pub resource_id: String,
    pub resource_title: String,
    pub restore_data: serde_json::Value,
    pub restore_type: Option<String>,
    pub restore_options: serde_json::Value,
    pub resource_security_context: Option<String>,
    pub resource_security_object_type: Option<String>,
    pub resource_security_object_id: Option<String>,
    pub stored_at: Timestamp,
}

impl From<TrashItemRow> for TrashItem {
    fn from(row: TrashItemRow) -> Self {
        TrashItem {
            id: row.id,
            resource_key: row.resource_key,
            resource_id: row.resource_id,
            resource_title: row.resource_title,
            restore_data: row.restore_data,
            restore_type: row.restore_type,
            restore_options: row.restore_options,
            resource_security_context: row.resource_security_context,
            resource_security_object_type: row.resource_security_object_type,
            resource_security_object_id: row.resource_security_object_id,
            stored_at: row.stored_at,
        }
    }
}
