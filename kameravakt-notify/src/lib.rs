//! # Kameravakt Notification Delivery
//!
//! The notification capability consumed by the dispatcher: the
//! dispatcher decides *whether* to notify, this crate handles *how*.
//! Delivery failures are reported but never retried; decision state
//! belongs to the dispatcher alone.

pub mod mail;
pub mod notifier;

pub use mail::{MailNotifier, MailSettings};
pub use notifier::{Notifier, NotifyError};
