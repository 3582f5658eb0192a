//! The single decision point for notifications.
//!
//! One task consumes both shared channels, strictly one message at a
//! time. Because nothing else ever touches the dampening map or the
//! presence marker, no locking exists anywhere in the decision path and
//! decisions are linearizable by construction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use opentelemetry::KeyValue;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use kameravakt_core::camera::CameraId;
use kameravakt_core::events::{Event, EventReceiver, PresencePulse, PresenceReceiver};
use kameravakt_core::shutdown::Shutdown;
use kameravakt_notify::Notifier;
use kameravakt_telemetry::{EventLogger, MetricsRecorder};

/// Suppression scope: one window per event kind per camera.
pub type DampKey = (String, CameraId);

/// The two time windows the dispatcher applies to every event.
#[derive(Clone, Copy, Debug)]
pub struct DispatchWindows {
    /// Minimum silence per dampening key between notifications.
    pub dampening: Duration,
    /// Hold-off after the last presence pulse during which no event
    /// notifies at all.
    pub ping_disable: Duration,
}

/// Owns all dampening state and the notifier handle.
pub struct Dispatcher {
    windows: DispatchWindows,
    notifier: Arc<dyn Notifier>,
    metrics: Arc<MetricsRecorder>,
    dampener: HashMap<DampKey, Instant>,
    presence_seen: Option<Instant>,
}

impl Dispatcher {
    pub fn new(
        windows: DispatchWindows,
        notifier: Arc<dyn Notifier>,
        metrics: Arc<MetricsRecorder>,
    ) -> Self {
        Self {
            windows,
            notifier,
            metrics,
            dampener: HashMap::new(),
            presence_seen: None,
        }
    }

    /// The serialized decision loop. Runs until shutdown or until both
    /// producer channels close.
    pub async fn run(
        mut self,
        mut events: EventReceiver,
        mut presence: PresenceReceiver,
        mut shutdown: Shutdown,
    ) {
        info!("dispatcher started");
        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    info!("dispatcher shutting down");
                    return;
                }
                Some(pulse) = presence.recv() => self.handle_pulse(pulse),
                Some(event) = events.recv() => self.handle_event(event).await,
                else => {
                    info!("all producers gone, dispatcher exiting");
                    return;
                }
            }
        }
    }

    fn handle_pulse(&mut self, pulse: PresencePulse) {
        debug!(host = %pulse.host, "presence pulse");
        self.presence_seen = Some(Instant::now());
    }

    async fn handle_event(&mut self, event: Event) {
        self.metrics.inc_events();
        let now = Instant::now();

        if self.decide(&event, now) {
            self.metrics.inc_notifications();
            EventLogger::log_event(
                &event.kind,
                vec![
                    KeyValue::new("camera", event.camera.name.clone()),
                    KeyValue::new("state", event.state.clone()),
                    KeyValue::new("count", i64::from(event.count)),
                ],
            )
            .await;

            if let Err(e) = self.notifier.notify(&event, Utc::now()).await {
                // The decision stands; delivery is best-effort.
                warn!(
                    camera = %event.camera.name,
                    kind = %event.kind,
                    error = %e,
                    "notification delivery failed"
                );
            }
        } else {
            self.metrics.inc_suppressed();
            debug!(
                camera = %event.camera.name,
                kind = %event.kind,
                "event suppressed"
            );
        }
    }

    /// Applies both suppression policies.
    ///
    /// The key's decision timestamp is recorded whether or not the event
    /// notifies: a suppressed event still counts as the most recent
    /// occurrence, so a steady trickle keeps renewing its own window.
    fn decide(&mut self, event: &Event, now: Instant) -> bool {
        let key = (event.kind.clone(), event.camera.id);

        let presence_open = match self.presence_seen {
            None => true,
            Some(seen) => now > seen + self.windows.ping_disable,
        };
        let dampening_open = match self.dampener.get(&key) {
            None => true,
            Some(&last) => now > last + self.windows.dampening,
        };
        self.dampener.insert(key, now);

        presence_open && dampening_open
    }
}
