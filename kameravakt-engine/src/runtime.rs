//! Runtime wiring and task supervision.
//!
//! Spawns one feed task per camera, one presence monitor per host and
//! the dispatcher, then watches over them: a task that dies is logged
//! and isolated, never allowed to take the process down with it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use kameravakt_config::KameravaktConfig;
use kameravakt_core::camera::{Camera, CameraId};
use kameravakt_core::events::{event_channel, presence_channel};
use kameravakt_core::shutdown::Shutdown;
use kameravakt_notify::Notifier;
use kameravakt_presence::{PresenceMonitor, ReachabilityProbe};
use kameravakt_stream::{CameraFeed, FeedAuth};
use kameravakt_telemetry::MetricsRecorder;

use crate::dispatcher::{DispatchWindows, Dispatcher};

/// Owns everything needed to run the monitor for the process lifetime.
pub struct MonitorRuntime {
    config: Arc<KameravaktConfig>,
    notifier: Arc<dyn Notifier>,
    probe: Arc<dyn ReachabilityProbe>,
    pub metrics: Arc<MetricsRecorder>,
}

impl MonitorRuntime {
    pub fn new(
        config: KameravaktConfig,
        notifier: Arc<dyn Notifier>,
        probe: Arc<dyn ReachabilityProbe>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            notifier,
            probe,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Spawns every monitoring task and runs until `shutdown` fires.
    pub async fn run(&self, shutdown: Shutdown) {
        let timing = &self.config.timing;
        let (events_tx, events_rx) = event_channel();
        let (pulses_tx, pulses_rx) = presence_channel();

        let mut supervised = Vec::new();

        for (index, camera_config) in self.config.cameras.iter().enumerate() {
            let camera = Arc::new(Camera::new(
                CameraId(index as u32),
                camera_config.name.clone(),
                camera_config.url.clone(),
            ));
            info!(camera = %camera.name, url = %camera.url, "monitoring camera");

            let feed = CameraFeed::new(
                camera,
                FeedAuth {
                    username: self.config.feed.username.clone(),
                    password: self.config.feed.password.clone(),
                },
                timing.error_retry(),
                timing.watchdog(),
                events_tx.clone(),
                shutdown.clone(),
            );
            supervised.push(supervise(
                format!("feed:{}", camera_config.name),
                tokio::spawn(feed.run()),
            ));
        }

        for host in &self.config.hosts {
            info!(host = %host, "monitoring host");
            let monitor = PresenceMonitor::new(
                host.clone(),
                timing.ping_interval(),
                self.probe.clone(),
                pulses_tx.clone(),
                shutdown.clone(),
            );
            supervised.push(supervise(
                format!("presence:{host}"),
                tokio::spawn(monitor.run()),
            ));
        }

        // The dispatcher holds the only receivers; producers must not
        // keep the channels alive once their tasks are gone.
        drop(events_tx);
        drop(pulses_tx);

        let dispatcher = Dispatcher::new(
            DispatchWindows {
                dampening: timing.dampening(),
                ping_disable: timing.ping_disable(),
            },
            self.notifier.clone(),
            self.metrics.clone(),
        );
        let dispatcher_task = tokio::spawn(dispatcher.run(events_rx, pulses_rx, shutdown));

        if let Err(e) = dispatcher_task.await {
            if e.is_panic() {
                error!("dispatcher panicked; no further notifications will be sent");
            }
        }
        for task in supervised {
            let _ = task.await;
        }
        info!("monitor runtime stopped");
    }
}

/// Observes a task handle so a dead task is logged instead of silently
/// disappearing (or worse, unwinding into the runtime).
fn supervise(name: String, handle: JoinHandle<()>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match handle.await {
            Ok(()) => debug!(task = %name, "task finished"),
            Err(e) if e.is_panic() => {
                error!(task = %name, "task panicked; continuing without it")
            }
            Err(e) => error!(task = %name, error = %e, "task aborted"),
        }
    })
}
