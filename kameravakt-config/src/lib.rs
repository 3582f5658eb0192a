//! # Kameravakt Configuration System
//!
//! Hierarchical configuration for the monitor:
//! 1. Built-in defaults
//! 2. `config/kameravakt.yaml` (if present)
//! 3. `KAMERAVAKT_*` environment variables
//!
//! Loaded once at startup and validated before any task spawns; a load
//! failure is the only fatal error in the system.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod cameras;
mod error;
mod feed;
mod mail;
mod timing;
mod validation;

pub use cameras::CameraConfig;
pub use error::ConfigError;
pub use feed::FeedConfig;
pub use mail::MailConfig;
pub use timing::TimingConfig;

/// Default configuration file location, relative to the working
/// directory.
pub const DEFAULT_CONFIG_FILE: &str = "config/kameravakt.yaml";

/// Top-level configuration record, immutable after startup.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct KameravaktConfig {
    /// Cameras whose alert streams are monitored.
    #[validate(nested)]
    #[serde(default)]
    pub cameras: Vec<CameraConfig>,

    /// Hosts sampled for network presence.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Basic-auth credentials shared by all camera feeds.
    #[validate(nested)]
    #[serde(default)]
    pub feed: FeedConfig,

    /// Time windows for dampening, retries and probing.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Notification delivery parameters.
    #[validate(nested)]
    #[serde(default)]
    pub mail: MailConfig,
}

impl KameravaktConfig {
    /// Load configuration from the default file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(KameravaktConfig::default()));

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            figment = figment.merge(Yaml::file(DEFAULT_CONFIG_FILE));
        } else {
            println!("{DEFAULT_CONFIG_FILE} not found, using default configuration");
        }

        figment
            .merge(Env::prefixed("KAMERAVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(KameravaktConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("KAMERAVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
