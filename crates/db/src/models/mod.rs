pub mod abbreviation;
pub mod media;
pub mod route;
pub mod trash_item;
