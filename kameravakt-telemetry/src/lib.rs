//! # Kameravakt Telemetry
//!
//! Logging and metrics for the monitor. Kept deliberately small: a
//! tracing subscriber initializer, structured notification logging, and
//! a handful of prometheus counters over the dispatcher's decisions.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
