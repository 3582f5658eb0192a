//! The notification interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use kameravakt_core::events::Event;

/// Errors surfaced by a notifier. All of them are non-fatal to the
/// dispatcher: logged, never retried.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivers a notification for an event that passed both suppression
/// policies, out of band of the decision loop's state.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &Event, at: DateTime<Utc>) -> Result<(), NotifyError>;
}
