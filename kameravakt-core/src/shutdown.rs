//! Cooperative shutdown signal shared by all long-lived tasks.
//!
//! Every task in the system runs for process lifetime; the signal exists
//! so tests and the CLI can stop them cleanly instead of aborting.

use tokio::sync::watch;

/// Creates a linked shutdown pair. The handle signals once; receivers
/// are cloned into every spawned task.
pub fn shutdown_channel() -> (ShutdownHandle, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, Shutdown { rx })
}

/// Signals shutdown to every associated [`Shutdown`] receiver.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    pub fn signal(&self) {
        // Receivers may all be gone already; nothing to do then.
        let _ = self.tx.send(true);
    }
}

/// A task's view of the shutdown signal.
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Resolves once shutdown has been signalled. A dropped handle
    /// counts as shutdown so tasks never outlive their runtime.
    pub async fn wait(&mut self) {
        while !*self.rx.borrow() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }

    pub fn is_signalled(&self) -> bool {
        *self.rx.borrow()
    }
}
