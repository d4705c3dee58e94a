//! Capture looping ASCII-art animations from a 3D subject and play them back on a timer.
//!
//! A capture run moves a subject past a fixed camera (or dollies the camera), renders each
//! placement through a [`RenderBackend`], converts the raster into character rows and stores the
//! result as an [`AnimationRecord`]. A [`Player`] replays stored records at a configurable frame
//! rate through a [`FrameSink`].
#![forbid(unsafe_code)]

mod foundation;

pub mod capture;
pub mod playback;
pub mod record;

pub use capture::ascii::{AsciiRasterizer, CharRamp};
pub use capture::backend::{LumaBackend, RenderBackend};
pub use capture::context::{
    Aabb, Camera, CameraReadout, Light, RenderContext, Scene, Subject, Transform,
};
pub use capture::motion::{CameraPathSample, CaptureMode, MotionStyle, progress};
pub use capture::pipeline::{CaptureOutput, CaptureParams, generate};
pub use foundation::core::{Fps, Vec3};
pub use foundation::error::{PartialCaptureWarning, ReelError, ReelResult};
pub use playback::TimerStats;
pub use playback::engine::{PlaybackState, Player, PlayerOpts, PlayerStatus};
pub use playback::sink::{DisplayedFrame, FrameSink, InMemorySink, TerminalSink};
pub use record::model::AnimationRecord;
pub use record::store::{DirStore, MemoryStore, RecordStore};
