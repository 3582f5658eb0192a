//! Notification delivery configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// SMTP parameters for outgoing notifications.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct MailConfig {
    /// Sender address.
    #[validate(custom(function = validation::validate_optional_address))]
    #[serde(default)]
    pub from: String,

    /// Recipient addresses.
    #[validate(custom(function = validation::validate_address_list))]
    #[serde(default)]
    pub to: Vec<String>,

    /// SMTP relay host.
    #[serde(default)]
    pub server: String,

    /// SMTP relay port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// SMTP account credentials.
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

fn default_port() -> u16 {
    587
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: Vec::new(),
            server: String::new(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
        }
    }
}
