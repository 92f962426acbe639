//! Generic trash records and the restore configuration handed to the
//! restore UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A soft-deleted resource as kept by the trash storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashItem {
    pub id: DbId,
    pub resource_key: String,
    /// Id of the deleted resource, stored as text so any key type fits.
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

/// Input for [`TrashItemRepository::create`](crate::ports::TrashItemRepository::create).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrashItem {
    pub resource_key: String,
    pub resource_id: String,
    pub resource_title: String,
    pub restore_data: serde_json::Value,
    pub restore_type: Option<String>,
    pub restore_options: serde_json::Value,
    pub resource_security_context: Option<String>,
    pub resource_security_object_type: Option<String>,
    pub resource_security_object_id: Option<String>,
}

/// Where the restore UI navigates after a successful restore, and how
/// route parameters of that view map onto fields of the restored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreConfiguration {
    pub form: Option<String>,
    pub view: Option<String>,
    pub result_to_view: BTreeMap<String, String>,
}
