//! # Kameravakt Presence Sampling
//!
//! Periodic host reachability probing. Each configured host gets its own
//! monitor task; a successful probe becomes a pulse on the shared
//! presence channel, a failed one becomes nothing at all.

pub mod monitor;
pub mod probe;

pub use monitor::PresenceMonitor;
pub use probe::{PingProbe, ReachabilityProbe};
