//! Camera list configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One monitored camera: where its alert stream lives and what to call
/// it in notifications.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CameraConfig {
    /// Full URL of the camera's alert stream endpoint.
    #[validate(url)]
    pub url: String,

    /// Display name used in notifications and logs.
    #[validate(length(min = 1))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_name() {
        let camera = CameraConfig {
            url: "http://10.0.0.3/alerts".into(),
            name: String::new(),
        };
        assert!(camera.validate().is_err());
    }

    #[test]
    fn accepts_a_plain_http_endpoint() {
        let camera = CameraConfig {
            url: "http://10.0.0.3/ISAPI/Event/notification/alertStream".into(),
            name: "entry".into(),
        };
        camera.validate().unwrap();
    }
}
