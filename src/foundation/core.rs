use crate::foundation::error::{ReelError, ReelResult};
use std::time::Duration;

/// World-space 3-vector used for camera, light and subject placement.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Playback rate in frames per second.
///
/// Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct Fps(f64);

impl Fps {
    /// Default playback and preview rate.
    pub const DEFAULT: Fps = Fps(15.0);

    /// Create a validated FPS value.
    pub fn new(fps: f64) -> ReelResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ReelError::validation(format!(
                "fps must be a positive finite number, got {fps}"
            )));
        }
        Ok(Self(fps))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Timer period between two frame ticks (`1000 / fps` milliseconds).
    pub fn frame_interval(self) -> Duration {
        let nanos = (1e9 / self.0).round().max(1.0);
        Duration::from_nanos(nanos as u64)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> serde::Deserialize<'de> for Fps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Fps::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
