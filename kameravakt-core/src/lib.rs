//! # kameravakt-core
//!
//! Shared data model and channel plumbing for the camera monitor.
//! Every other crate builds on the types here: camera identity, the
//! event value type, the two producer channels feeding the dispatcher,
//! and the cooperative shutdown signal.

pub mod camera;
pub mod events;
pub mod shutdown;

pub mod prelude {
    pub use crate::camera::{Camera, CameraId};
    pub use crate::events::{
        event_channel, presence_channel, Event, EventReceiver, EventSender, PresencePulse,
        PresenceReceiver, PresenceSender,
    };
    pub use crate::shutdown::{shutdown_channel, Shutdown, ShutdownHandle};
}
