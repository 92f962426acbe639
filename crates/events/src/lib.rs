//! Activity events for the abbreviations module.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ActivityEvent`]: the envelope activity-log consumers receive.
//! - [`BufferedEventCollector`]: the domain event collector handed to the
//!   trash handler; it holds events back until the restore has committed.

pub mod bus;
pub mod collector;

pub use bus::{ActivityEvent, EventBus};
pub use collector::BufferedEventCollector;
