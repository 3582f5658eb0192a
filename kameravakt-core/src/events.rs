//! Event model and the two shared channels feeding the dispatcher.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::camera::Camera;

/// Event kind reserved for watchdog timeouts.
pub const WATCHDOG_EVENT_KIND: &str = "watchdog";

/// Event state carried by watchdog timeouts.
pub const WATCHDOG_EVENT_STATE: &str = "lost-signal";

/// A complete camera event.
///
/// Producers only ever emit complete events: kind and state populated,
/// count greater than zero. Partial accumulator state never leaves the
/// stream parser.
#[derive(Clone, Debug)]
pub struct Event {
    pub kind: String,
    pub state: String,
    pub count: u32,
    pub camera: Arc<Camera>,
}

/// A host answered a reachability probe.
///
/// The host name is carried for logging only; the dispatcher treats all
/// pulses alike.
#[derive(Clone, Debug)]
pub struct PresencePulse {
    pub host: String,
}

pub type EventSender = mpsc::Sender<Event>;
pub type EventReceiver = mpsc::Receiver<Event>;
pub type PresenceSender = mpsc::Sender<PresencePulse>;
pub type PresenceReceiver = mpsc::Receiver<PresencePulse>;

/// Capacity of the shared channels. One is the smallest tokio allows;
/// producers block on `send` until the dispatcher is ready, the closest
/// analogue of an unbuffered channel. There is deliberately no further
/// buffering or backpressure policy.
const CHANNEL_CAPACITY: usize = 1;

/// Creates the shared event channel (all feeds and watchdogs -> dispatcher).
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel(CHANNEL_CAPACITY)
}

/// Creates the shared presence channel (all presence monitors -> dispatcher).
pub fn presence_channel() -> (PresenceSender, PresenceReceiver) {
    mpsc::channel(CHANNEL_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraId;

    fn test_event(count: u32) -> Event {
        Event {
            kind: "motion".into(),
            state: "active".into(),
            count,
            camera: Arc::new(Camera::new(CameraId(0), "front", "http://cam/alerts")),
        }
    }

    #[tokio::test]
    async fn preserves_per_producer_ordering() {
        let (tx, mut rx) = event_channel();
        tokio::spawn(async move {
            for count in 1..=3 {
                tx.send(test_event(count)).await.unwrap();
            }
        });

        for expected in 1..=3 {
            assert_eq!(rx.recv().await.unwrap().count, expected);
        }
    }

    #[tokio::test]
    async fn send_blocks_until_receiver_ready() {
        let (tx, mut rx) = event_channel();
        tx.send(test_event(1)).await.unwrap();
        // Capacity is one: the next send cannot complete before a recv.
        let pending = tokio::spawn(async move {
            tx.send(test_event(2)).await.unwrap();
        });
        assert_eq!(rx.recv().await.unwrap().count, 1);
        assert_eq!(rx.recv().await.unwrap().count, 2);
        pending.await.unwrap();
    }
}
