use crate::capture::ascii::CharRamp;
use crate::capture::backend::RenderBackend;
use crate::capture::context::{Camera, CaptureScope, RenderContext};
use crate::capture::motion::{CameraPathSample, CaptureMode, MotionStyle, plan_path};
use crate::capture::text::normalize_raster_text;
use crate::foundation::error::{PartialCaptureWarning, ReelError, ReelResult};
use crate::record::grid::normalize_grid;
use crate::record::model::AnimationRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for one capture run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureParams {
    /// Number of frames to generate, `>= 1`.
    pub frame_count: usize,
    /// Maximum subject displacement from its resting position.
    pub travel_distance: f64,
    pub motion_style: MotionStyle,
    pub mode: CaptureMode,
    /// Character columns per frame row.
    pub raster_width: u32,
    pub character_ramp: String,
    /// Pause between render and rasterization for renderers without a completion signal.
    pub settle_ms: u64,
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            frame_count: 60,
            travel_distance: 50.0,
            motion_style: MotionStyle::default(),
            mode: CaptureMode::default(),
            raster_width: 120,
            character_ramp: CharRamp::DEFAULT.to_owned(),
            settle_ms: 50,
        }
    }
}

impl CaptureParams {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Check every field and return the parsed character ramp.
    pub fn validate(&self) -> ReelResult<CharRamp> {
        if self.frame_count == 0 {
            return Err(ReelError::validation("frame_count must be >= 1"));
        }
        if !self.travel_distance.is_finite() || self.travel_distance < 0.0 {
            return Err(ReelError::validation(
                "travel_distance must be a finite number >= 0",
            ));
        }
        if self.raster_width == 0 {
            return Err(ReelError::validation("raster_width must be >= 1"));
        }
        if let CaptureMode::CameraDolly {
            start_distance,
            end_distance,
        } = self.mode
        {
            if !start_distance.is_finite() || !end_distance.is_finite() {
                return Err(ReelError::validation("dolly distances must be finite"));
            }
        }
        CharRamp::new(&self.character_ramp)
    }
}

/// Result of a capture run.
#[derive(Clone, Debug)]
pub struct CaptureOutput {
    pub record: AnimationRecord,
    /// Placement used for each frame, in generation order.
    pub path: Vec<CameraPathSample>,
    /// Present when one or more frames came back empty.
    pub warning: Option<PartialCaptureWarning>,
}

/// Capture one complete animation record of the subject loaded in `ctx`.
///
/// Frames are generated strictly one at a time: frame `i + 1` is not rendered before the text of
/// frame `i` has been captured. A frame whose render fails or whose rasterization is empty is
/// stored as `""` and listed in [`CaptureOutput::warning`]. The subject transform and camera in
/// `ctx` are restored before this returns, whether it succeeds or not.
#[tracing::instrument(
    skip_all,
    fields(frames = params.frame_count, style = ?params.motion_style, mode = ?params.mode)
)]
pub async fn generate<B: RenderBackend>(
    ctx: &mut RenderContext,
    backend: &mut B,
    params: &CaptureParams,
) -> ReelResult<CaptureOutput> {
    let ramp = params.validate()?;
    let subject_id = ctx.subject().ok_or(ReelError::NoSubject)?.id.clone();

    let mut scope = ctx.capture_scope()?;
    let path = plan_path(
        params.frame_count,
        params.travel_distance,
        params.motion_style,
        params.mode,
        scope.initial_camera(),
        scope.initial_transform(),
    );
    let settle = (!backend.signals_completion()).then(|| params.settle());

    let mut frames = Vec::with_capacity(path.len());
    let mut empty = Vec::new();
    for sample in &path {
        let camera = Camera {
            position: sample.camera_position,
            target: sample.camera_target,
            ..*scope.initial_camera()
        };
        scope.place(sample.subject_position, camera);

        match capture_frame(&scope, backend, params.raster_width, &ramp, settle).await {
            Ok(Some(text)) => {
                tracing::debug!(frame = sample.index, bytes = text.len(), "captured frame");
                frames.push(text);
            }
            Ok(None) => {
                tracing::warn!(frame = sample.index, "rasterizer returned no content");
                empty.push(sample.index);
                frames.push(String::new());
            }
            Err(e) => {
                tracing::warn!(frame = sample.index, error = %e, "frame render failed");
                empty.push(sample.index);
                frames.push(String::new());
            }
        }
    }
    drop(scope);

    normalize_grid(&mut frames);
    let record = AnimationRecord::new(subject_id, frames)?.with_generated_at(chrono::Utc::now());
    let warning = (!empty.is_empty()).then(|| PartialCaptureWarning { frames: empty });
    if let Some(w) = &warning {
        tracing::warn!(warning = %w, "capture finished with empty frames");
    }

    Ok(CaptureOutput {
        record,
        path,
        warning,
    })
}

async fn capture_frame<B: RenderBackend>(
    scope: &CaptureScope<'_>,
    backend: &mut B,
    width: u32,
    ramp: &CharRamp,
    settle: Option<Duration>,
) -> ReelResult<Option<String>> {
    let raster = backend.render_frame(scope.camera(), scope.scene()).await?;
    if let Some(delay) = settle {
        tokio::time::sleep(delay).await;
    }
    let text = backend
        .rasterize(&raster, width, ramp)?
        .map(|raw| normalize_raster_text(&raw))
        .filter(|t| !t.is_empty());
    Ok(text)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/pipeline.rs"]
mod tests;
