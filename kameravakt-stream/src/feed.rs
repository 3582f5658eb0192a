//! Long-lived camera feed connections.
//!
//! One task per camera: connect to the alert stream, read it line by
//! line forever, and hand complete events to the dispatcher. Every
//! failure degrades to log-and-reconnect, with connection attempts
//! spaced at least the error-retry window apart.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

use kameravakt_core::camera::Camera;
use kameravakt_core::events::EventSender;
use kameravakt_core::shutdown::Shutdown;
use kameravakt_protocols::EventAssembler;

use crate::line_buffer::LineBuffer;
use crate::watchdog::Watchdog;

/// Basic-auth credentials for the camera's alert stream.
#[derive(Clone, Debug)]
pub struct FeedAuth {
    pub username: String,
    pub password: String,
}

/// Failure of a single connection attempt. The feed loop logs these and
/// reconnects; none of them is fatal.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("feed stream ended")]
    StreamEnded,
}

/// Per-camera feed task: owns the camera's assembler and its watchdog.
pub struct CameraFeed {
    camera: Arc<Camera>,
    auth: FeedAuth,
    retry_window: Duration,
    watchdog_window: Duration,
    events: EventSender,
    shutdown: Shutdown,
}

impl CameraFeed {
    pub fn new(
        camera: Arc<Camera>,
        auth: FeedAuth,
        retry_window: Duration,
        watchdog_window: Duration,
        events: EventSender,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            camera,
            auth,
            retry_window,
            watchdog_window,
            events,
            shutdown,
        }
    }

    /// Runs until shutdown.
    ///
    /// The watchdog is spawned once, up front; reconnecting the feed
    /// does not recreate it, so its lost-signal counter spans the whole
    /// process lifetime.
    #[instrument(skip_all, fields(camera = %self.camera.name))]
    pub async fn run(mut self) {
        let (liveness_tx, liveness_rx) = mpsc::channel::<()>(1);
        tokio::spawn(
            Watchdog::new(
                self.camera.clone(),
                self.watchdog_window,
                liveness_rx,
                self.events.clone(),
            )
            .run(),
        );

        let client = Client::new();
        let mut assembler = EventAssembler::new(self.camera.clone());
        let mut last_attempt: Option<Instant> = None;

        while !self.shutdown.is_signalled() {
            if let Some(last) = last_attempt {
                let spacing = self.retry_window.saturating_sub(last.elapsed());
                if !spacing.is_zero() {
                    debug!(camera = %self.camera.name, ?spacing, "spacing out connection attempts");
                    tokio::select! {
                        _ = sleep(spacing) => {}
                        _ = self.shutdown.wait() => return,
                    }
                }
            }
            last_attempt = Some(Instant::now());

            match self.read_stream(&client, &mut assembler, &liveness_tx).await {
                Ok(()) => return,
                Err(e) => warn!(camera = %self.camera.name, error = %e, "feed connection lost"),
            }
        }
    }

    /// One connection cycle: connect, then read lines until the stream
    /// breaks. Returns `Ok` only on shutdown.
    async fn read_stream(
        &mut self,
        client: &Client,
        assembler: &mut EventAssembler,
        liveness: &mpsc::Sender<()>,
    ) -> Result<(), FeedError> {
        let mut response = client
            .get(&self.camera.url)
            .basic_auth(&self.auth.username, Some(&self.auth.password))
            .send()
            .await?
            .error_for_status()?;
        info!(camera = %self.camera.name, "connected to alert stream");

        let mut lines = LineBuffer::new();
        loop {
            let chunk = tokio::select! {
                chunk = response.chunk() => chunk?,
                _ = self.shutdown.wait() => return Ok(()),
            };
            let Some(chunk) = chunk else {
                return Err(FeedError::StreamEnded);
            };

            lines.extend(&chunk);
            while let Some(line) = lines.next_line() {
                // Pulse before parsing: a stalled feed must be
                // detectable even when lines carry no known fields.
                let _ = liveness.send(()).await;

                if let Some(event) = assembler.push_line(&line) {
                    debug!(
                        camera = %self.camera.name,
                        kind = %event.kind,
                        state = %event.state,
                        count = event.count,
                        "event assembled"
                    );
                    if self.events.send(event).await.is_err() {
                        // Dispatcher is gone; nothing left to feed.
                        return Ok(());
                    }
                }
            }
        }
    }
}
