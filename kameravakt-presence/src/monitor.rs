//! Periodic presence sampling for one host.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{instrument, warn};

use kameravakt_core::events::{PresencePulse, PresenceSender};
use kameravakt_core::shutdown::Shutdown;

use crate::probe::ReachabilityProbe;

/// Samples one host on a fixed cadence and reports successes only.
///
/// There is no "host down" event; going silent is the signal, and the
/// dispatcher interprets it.
pub struct PresenceMonitor {
    host: String,
    interval: Duration,
    probe: Arc<dyn ReachabilityProbe>,
    pulses: PresenceSender,
    shutdown: Shutdown,
}

impl PresenceMonitor {
    pub fn new(
        host: String,
        interval: Duration,
        probe: Arc<dyn ReachabilityProbe>,
        pulses: PresenceSender,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            host,
            interval,
            probe,
            pulses,
            shutdown,
        }
    }

    /// Runs until shutdown or until the dispatcher goes away.
    #[instrument(skip_all, fields(host = %self.host))]
    pub async fn run(mut self) {
        loop {
            if self.probe.probe(&self.host).await {
                let pulse = PresencePulse {
                    host: self.host.clone(),
                };
                if self.pulses.send(pulse).await.is_err() {
                    return;
                }
            } else {
                warn!(host = %self.host, "presence probe failed");
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = self.shutdown.wait() => return,
            }
        }
    }
}
