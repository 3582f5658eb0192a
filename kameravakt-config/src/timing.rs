//! Time windows for dampening, retries and probing.
//!
//! All values are whole seconds. A missing, zero or negative value
//! falls back to its documented default at access time, so a partially
//! filled configuration file still yields a working monitor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAMPENING_SECS: i64 = 10;
pub const DEFAULT_ERROR_RETRY_SECS: i64 = 5;
pub const DEFAULT_WATCHDOG_SECS: i64 = 5;
pub const DEFAULT_PING_INTERVAL_SECS: i64 = 1;
pub const DEFAULT_PING_DISABLE_SECS: i64 = 600;

#[derive(Default, Debug, Serialize, Deserialize, Clone)]
pub struct TimingConfig {
    /// Minimum silence per (event kind, camera) before notifying again.
    #[serde(default)]
    pub dampening_secs: i64,

    /// Minimum spacing between feed connection attempts.
    #[serde(default)]
    pub error_retry_secs: i64,

    /// Feed silence tolerated before the watchdog fires.
    #[serde(default)]
    pub watchdog_secs: i64,

    /// Cadence of the per-host presence probe.
    #[serde(default)]
    pub ping_interval_secs: i64,

    /// Notification hold-off after the last observed presence pulse.
    #[serde(default)]
    pub ping_disable_secs: i64,
}

impl TimingConfig {
    pub fn dampening(&self) -> Duration {
        secs_or(self.dampening_secs, DEFAULT_DAMPENING_SECS)
    }

    pub fn error_retry(&self) -> Duration {
        secs_or(self.error_retry_secs, DEFAULT_ERROR_RETRY_SECS)
    }

    pub fn watchdog(&self) -> Duration {
        secs_or(self.watchdog_secs, DEFAULT_WATCHDOG_SECS)
    }

    pub fn ping_interval(&self) -> Duration {
        secs_or(self.ping_interval_secs, DEFAULT_PING_INTERVAL_SECS)
    }

    pub fn ping_disable(&self) -> Duration {
        secs_or(self.ping_disable_secs, DEFAULT_PING_DISABLE_SECS)
    }
}

fn secs_or(value: i64, fallback: i64) -> Duration {
    let secs = if value <= 0 { fallback } else { value };
    Duration::from_secs(secs as u64)
}
