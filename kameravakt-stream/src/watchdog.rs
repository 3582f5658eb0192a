//! Silent-feed detection, independent of protocol content.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, warn};

use kameravakt_core::camera::Camera;
use kameravakt_core::events::{Event, EventSender, WATCHDOG_EVENT_KIND, WATCHDOG_EVENT_STATE};

/// Emits a synthetic lost-signal event whenever its camera's feed goes
/// quiet for a full interval, and keeps emitting one per interval until
/// a liveness pulse arrives.
///
/// Spawned once per camera when the feed task starts; reconnects of the
/// feed do not recreate it, so its counter only resets with the process.
pub struct Watchdog {
    camera: Arc<Camera>,
    interval: Duration,
    liveness: mpsc::Receiver<()>,
    events: EventSender,
}

impl Watchdog {
    pub fn new(
        camera: Arc<Camera>,
        interval: Duration,
        liveness: mpsc::Receiver<()>,
        events: EventSender,
    ) -> Self {
        Self {
            camera,
            interval,
            liveness,
            events,
        }
    }

    /// Runs until the liveness channel closes (feed task gone) or the
    /// event channel closes (dispatcher gone).
    ///
    /// Each cycle races a fresh timeout against the next pulse: a pulse
    /// re-arms the timer, a timeout emits the next lost-signal event and
    /// re-arms immediately.
    pub async fn run(mut self) {
        let mut count: u32 = 1;
        loop {
            match timeout(self.interval, self.liveness.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => {
                    debug!(camera = %self.camera.name, "liveness channel closed, watchdog exiting");
                    return;
                }
                Err(_) => {
                    warn!(
                        camera = %self.camera.name,
                        count,
                        "no liveness pulse within interval"
                    );
                    let event = Event {
                        kind: WATCHDOG_EVENT_KIND.into(),
                        state: WATCHDOG_EVENT_STATE.into(),
                        count,
                        camera: self.camera.clone(),
                    };
                    count = count.saturating_add(1);
                    if self.events.send(event).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kameravakt_core::camera::CameraId;
    use kameravakt_core::events::event_channel;
    use tokio::time::{advance, Duration};

    fn camera() -> Arc<Camera> {
        Arc::new(Camera::new(CameraId(0), "front", "http://nvr/alerts"))
    }

    #[tokio::test(start_paused = true)]
    async fn emits_increasing_counts_while_silent() {
        let (liveness_tx, liveness_rx) = mpsc::channel(1);
        let (events_tx, mut events_rx) = event_channel();
        tokio::spawn(Watchdog::new(camera(), Duration::from_secs(5), liveness_rx, events_tx).run());

        for expected in 1..=3 {
            let event = events_rx.recv().await.unwrap();
            assert_eq!(event.kind, WATCHDOG_EVENT_KIND);
            assert_eq!(event.state, WATCHDOG_EVENT_STATE);
            assert_eq!(event.count, expected);
        }
        drop(liveness_tx);
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_rearms_without_emitting() {
        let (liveness_tx, liveness_rx) = mpsc::channel(1);
        let (events_tx, mut events_rx) = event_channel();
        tokio::spawn(Watchdog::new(camera(), Duration::from_secs(5), liveness_rx, events_tx).run());

        // Keep the feed "alive" across what would be two timeouts.
        for _ in 0..4 {
            advance(Duration::from_secs(3)).await;
            liveness_tx.send(()).await.unwrap();
        }
        assert!(events_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn counter_survives_pulses_between_timeouts() {
        let (liveness_tx, liveness_rx) = mpsc::channel(1);
        let (events_tx, mut events_rx) = event_channel();
        tokio::spawn(Watchdog::new(camera(), Duration::from_secs(5), liveness_rx, events_tx).run());

        assert_eq!(events_rx.recv().await.unwrap().count, 1);
        liveness_tx.send(()).await.unwrap();
        // Silence again: the counter continues rather than restarting.
        assert_eq!(events_rx.recv().await.unwrap().count, 2);
        drop(liveness_tx);
    }
}
