//! # Publisher Module
//!
//! The background loop that emits randomized temperature readings on a fixed
//! cadence, and the handle the control API uses to start and stop it.
//!
//! ```text
//! publisher/
//! ├── handle.rs  - supervised task lifecycle (start, stop, is_running)
//! └── reading.rs - reading generation and wire formatting
//! ```
//!
//! At most one loop is active at a time. Stopping is cooperative through a
//! cancellation token and takes effect within one publish interval.

pub mod handle;
pub mod reading;

pub use handle::{PublisherError, PublisherHandle, PUBLISH_INTERVAL};
pub use reading::Reading;
