//! # Kameravakt Engine
//!
//! The decision side of the monitor: the dispatcher that serializes all
//! notification decisions, and the runtime that wires configuration,
//! producers and the dispatcher together under supervision.

pub mod dispatcher;
pub mod runtime;

pub use dispatcher::{DispatchWindows, Dispatcher};
pub use runtime::MonitorRuntime;
