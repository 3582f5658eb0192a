//! Camera feed credentials.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Basic-auth credentials presented to every camera feed.
///
/// A single account is assumed across the fleet; cameras that need no
/// authentication simply ignore the header.
#[derive(Default, Debug, Serialize, Deserialize, Validate, Clone)]
pub struct FeedConfig {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}
