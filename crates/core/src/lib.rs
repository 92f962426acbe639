//! Domain core of the abbreviations content module.
//!
//! Holds the entity, its trash snapshot, the listing provider and the
//! trash/restore handler. Everything that touches storage or delivers
//! events goes through the traits in [`ports`].

pub mod abbreviation;
pub mod capabilities;
pub mod data_provider;
pub mod domain_event;
pub mod error;
pub mod filters;
pub mod pagination;
pub mod ports;
pub mod route;
pub mod snapshot;
pub mod trash;
pub mod trash_handler;
pub mod types;

#[cfg(test)]
mod test_support;
