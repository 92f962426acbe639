//! The abbreviation entity and its weak media reference.

use serde::{Deserialize, Serialize};

use crate::capabilities::{Author, Authored, Timestampable, UserBlame};
use crate::types::{DbId, Timestamp};

/// Key under which abbreviations are registered with the trash and the
/// smart-content layer.
pub const RESOURCE_KEY: &str = "abbreviations";

/// Security context checked before a trashed abbreviation may be restored.
pub const SECURITY_CONTEXT: &str = "abbreviations.abbreviations";

/// Entity class recorded on routes that resolve to an abbreviation.
pub const ENTITY_CLASS: &str = "Abbreviation";

/// Admin view the restore UI redirects to.
pub const EDIT_FORM_VIEW: &str = "abbreviations.edit_form";

/// An image owned by the media subsystem. Abbreviations only hold it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: DbId,
    pub title: Option<String>,
    pub file_name: String,
}

/// An abbreviation entry.
///
/// `id` is `None` until the entity has been persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Abbreviation {
    pub id: Option<DbId>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub locale: String,
    pub title: String,
    pub name: Option<String>,
    pub explanation: Option<String>,
    pub description: Option<String>,
    pub footer: Option<String>,
    pub route_path: String,
    pub ext: serde_json::Value,
    pub image: Option<Image>,
    pub published: bool,
    pub published_at: Option<Timestamp>,
    pub authored: Option<Timestamp>,
    pub author_id: Option<DbId>,
    pub creator_id: Option<DbId>,
    pub changer_id: Option<DbId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Abbreviation {
    /// An empty abbreviation for the given locale.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    pub fn image_id(&self) -> Option<DbId> {
        self.image.as_ref().map(|image| image.id)
    }
}

impl Timestampable for Abbreviation {
    fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }

    fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }
}

impl Authored for Abbreviation {
    fn authored(&self) -> Option<Timestamp> {
        self.authored
    }

    fn set_authored(&mut self, authored: Option<Timestamp>) {
        self.authored = authored;
    }
}

impl UserBlame for Abbreviation {
    fn creator_id(&self) -> Option<DbId> {
        self.creator_id
    }

    fn changer_id(&self) -> Option<DbId> {
        self.changer_id
    }
}

impl Author for Abbreviation {
    fn author_id(&self) -> Option<DbId> {
        self.author_id
    }

    fn set_author_id(&mut self, author_id: Option<DbId>) {
        self.author_id = author_id;
    }
}
