//! Optional entity capabilities.
//!
//! Each trait describes one independent concern (timestamps, authoring
//! date, user blame, author). Callers depend on the single capability they
//! need instead of a combined auditable interface.

use crate::types::{DbId, Timestamp};

/// Entities that track their own creation and modification times.
pub trait Timestampable {
    fn created_at(&self) -> Option<Timestamp>;
    fn updated_at(&self) -> Option<Timestamp>;
}

/// Entities with an editorial "authored" date, independent of row timestamps.
pub trait Authored {
    fn authored(&self) -> Option<Timestamp>;
    fn set_authored(&mut self, authored: Option<Timestamp>);
}

/// Entities that remember which users created and last changed them.
pub trait UserBlame {
    fn creator_id(&self) -> Option<DbId>;
    fn changer_id(&self) -> Option<DbId>;
}

/// Entities attributed to an author contact.
pub trait Author {
    fn author_id(&self) -> Option<DbId>;
    fn set_author_id(&mut self, author_id: Option<DbId>);
}
