//! Host reachability probing.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Capability to test whether a host currently answers on the network.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns true when the host answered the probe.
    async fn probe(&self, host: &str) -> bool;
}

/// Probes with a single ICMP echo via the system `ping` utility.
#[derive(Clone, Copy, Debug, Default)]
pub struct PingProbe;

#[async_trait]
impl ReachabilityProbe for PingProbe {
    async fn probe(&self, host: &str) -> bool {
        match Command::new("ping").args(["-c", "1"]).arg(host).output().await {
            Ok(output) => output.status.success(),
            Err(e) => {
                debug!(host, error = %e, "ping invocation failed");
                false
            }
        }
    }
}
