use crate::capture::context::{Camera, Transform};
use crate::foundation::core::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// How the subject's displacement evolves over a capture run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionStyle {
    /// Linear sweep from `-d` to `+d`, crossing the focal point at `t = 0.5`.
    #[default]
    PassThrough,
    /// Sine ease-out from `-d` to rest at the origin at `t = 1`.
    EaseToStop,
}

impl MotionStyle {
    /// Signed offset along the forward axis at normalized progress `t`.
    pub fn offset(self, t: f64, travel_distance: f64) -> f64 {
        let d = travel_distance;
        match self {
            Self::PassThrough => -d + 2.0 * d * t,
            Self::EaseToStop => -d + d * (t * FRAC_PI_2).sin(),
        }
    }
}

/// What moves during a capture run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CaptureMode {
    /// Camera fixed, subject displaced along its forward axis.
    #[default]
    SubjectFlyby,
    /// Subject fixed, camera moved along `+Z` from `start_distance` to `end_distance`, looking at
    /// the origin.
    CameraDolly {
        start_distance: f64,
        end_distance: f64,
    },
}

/// Scene placement for one frame of a capture run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPathSample {
    pub index: usize,
    /// Normalized progress in `[0, 1]`.
    pub t: f64,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub subject_offset: f64,
    pub subject_position: Vec3,
}

/// Normalized progress of frame `i` out of `frame_count`.
///
/// A single-frame run has `t = 0`.
pub fn progress(i: usize, frame_count: usize) -> f64 {
    let denom = frame_count.saturating_sub(1).max(1);
    i as f64 / denom as f64
}

/// Plan every frame of a capture run up front.
///
/// The forward axis is taken once from `subject` and held for the whole path.
pub(crate) fn plan_path(
    frame_count: usize,
    travel_distance: f64,
    style: MotionStyle,
    mode: CaptureMode,
    camera: &Camera,
    subject: &Transform,
) -> Vec<CameraPathSample> {
    let forward = subject.forward_axis();
    let origin = subject.position;

    (0..frame_count)
        .map(|index| {
            let t = progress(index, frame_count);
            match mode {
                CaptureMode::SubjectFlyby => {
                    let subject_offset = style.offset(t, travel_distance);
                    CameraPathSample {
                        index,
                        t,
                        camera_position: camera.position,
                        camera_target: camera.target,
                        subject_offset,
                        subject_position: origin + forward * subject_offset,
                    }
                }
                CaptureMode::CameraDolly {
                    start_distance,
                    end_distance,
                } => CameraPathSample {
                    index,
                    t,
                    camera_position: Vec3::new(
                        0.0,
                        0.0,
                        start_distance + (end_distance - start_distance) * t,
                    ),
                    camera_target: Vec3::zeros(),
                    subject_offset: 0.0,
                    subject_position: origin,
                },
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/capture/motion.rs"]
mod tests;
