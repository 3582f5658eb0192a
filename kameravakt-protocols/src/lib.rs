//! # Kameravakt Protocol Parsing
//!
//! Turns the cameras' alert-stream line protocol into discrete events.
//! The feed is loose tag-soup rather than well-formed XML, so fields are
//! extracted with fixed per-line patterns instead of a full parser.

pub mod alert_stream;

pub use alert_stream::{EventAssembler, FILTERED_EVENT_KIND};
