//! URL routes resolving to abbreviations.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Locale written on routes recreated by a restore.
pub const RESTORE_ROUTE_LOCALE: &str = "en";

/// A path bound to an entity class + id pair. The route does not own the
/// entity it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: Option<DbId>,
    pub path: String,
    pub locale: String,
    pub entity_class: String,
    pub entity_id: DbId,
    pub history: bool,
    pub created: Timestamp,
    pub changed: Timestamp,
}

impl Route {
    /// A fresh, non-history route stamped with the current time.
    pub fn new(
        path: impl Into<String>,
        locale: impl Into<String>,
        entity_class: impl Into<String>,
        entity_id: DbId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            path: path.into(),
            locale: locale.into(),
            entity_class: entity_class.into(),
            entity_id,
            history: false,
            created: now,
            changed: now,
        }
    }
}
