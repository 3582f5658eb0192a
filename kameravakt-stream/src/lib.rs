//! # Kameravakt Stream Capture
//!
//! Long-lived camera feed connections and per-camera liveness watchdogs.
//! One feed task per camera holds an authenticated streaming GET open
//! forever, splitting the unbounded response body into lines for the
//! protocol assembler; its watchdog turns feed silence into events.

pub mod feed;
pub mod line_buffer;
pub mod watchdog;

pub use feed::{CameraFeed, FeedAuth, FeedError};
pub use line_buffer::LineBuffer;
pub use watchdog::Watchdog;
