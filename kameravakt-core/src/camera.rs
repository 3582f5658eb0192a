//! Camera identity and addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a configured camera.
///
/// Assigned from the camera's position in the configuration. Dampening
/// keys use this instead of a reference to the camera record, so key
/// identity survives cloning and never depends on pointer semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CameraId(pub u32);

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cam{}", self.0)
    }
}

/// A monitored camera. Immutable after construction; shared across
/// tasks as `Arc<Camera>` for the life of the process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    pub url: String,
}

impl Camera {
    pub fn new(id: CameraId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_id_is_usable_as_map_key() {
        use std::collections::HashMap;

        let mut seen: HashMap<CameraId, &str> = HashMap::new();
        seen.insert(CameraId(0), "front");
        seen.insert(CameraId(1), "back");
        assert_eq!(seen.get(&CameraId(0)), Some(&"front"));
        assert_eq!(CameraId(1).to_string(), "cam1");
    }
}
