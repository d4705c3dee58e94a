use crate::foundation::core::Vec3;
use crate::foundation::error::{ReelError, ReelResult};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.inf(&max),
            max: min.sup(&max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest extent along any axis.
    pub fn max_dim(&self) -> f64 {
        self.size().max()
    }

    pub fn translated(&self, by: Vec3) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }
}

/// Subject placement: translation plus yaw (about Y) and pitch (about X), in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    #[serde(default)]
    pub yaw_deg: f64,
    #[serde(default)]
    pub pitch_deg: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            yaw_deg: 0.0,
            pitch_deg: 0.0,
        }
    }
}

impl Transform {
    /// World-space direction of the subject's local `+Z` axis.
    ///
    /// Rotation order matches an `XYZ` Euler convention: yaw is applied first, then pitch.
    pub fn forward_axis(&self) -> Vec3 {
        let (sy, cy) = self.yaw_deg.to_radians().sin_cos();
        let (sp, cp) = self.pitch_deg.to_radians().sin_cos();
        Vec3::new(sy, -cy * sp, cy * cp)
    }
}

/// A loaded, renderable subject.
///
/// Geometry lives with the rendering collaborator; the core only tracks identity, placement and
/// extent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub transform: Transform,
    pub bounds: Aabb,
}

impl Subject {
    pub fn new(id: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            id: id.into(),
            transform: Transform::default(),
            bounds,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Light {
    Ambient { intensity: f64 },
    Point { position: Vec3, intensity: f64 },
}

/// Everything the renderer draws apart from the camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub subject: Option<Subject>,
    pub lights: Vec<Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            subject: None,
            lights: vec![
                Light::Ambient { intensity: 0.5 },
                Light::Point {
                    position: Vec3::new(100.0, 100.0, 100.0),
                    intensity: 1.0,
                },
                Light::Point {
                    position: Vec3::new(-100.0, -50.0, -100.0),
                    intensity: 0.5,
                },
            ],
        }
    }
}

/// Perspective camera looking from `position` at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_deg: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 60.0),
            target: Vec3::zeros(),
            fov_deg: 60.0,
        }
    }
}

/// Human-facing camera placement relative to the world origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraReadout {
    pub distance: f64,
    /// Rotation around the Y axis, `atan2(x, z)`.
    pub azimuth_deg: f64,
    /// Angle above the XZ plane.
    pub elevation_deg: f64,
}

impl Camera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn readout(&self) -> CameraReadout {
        let p = self.position;
        let distance = p.norm();
        let elevation_deg = if distance > 0.0 {
            (p.y / distance).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            0.0
        };
        CameraReadout {
            distance,
            azimuth_deg: p.x.atan2(p.z).to_degrees(),
            elevation_deg,
        }
    }
}

/// Scene and camera state owned explicitly by the caller.
///
/// A capture run borrows the context mutably for its whole duration and restores the subject
/// transform and the camera when it ends.
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    scene: Scene,
    camera: Camera,
}

impl RenderContext {
    pub fn new(scene: Scene, camera: Camera) -> Self {
        Self { scene, camera }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.scene.subject.as_ref()
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn set_lights(&mut self, lights: Vec<Light>) {
        self.scene.lights = lights;
    }

    /// Replace the current subject, centering it on the origin and framing the camera on it.
    ///
    /// The camera moves to `(0, d, 2d)` looking at the origin, where `d` is the largest bounding
    /// box extent. Returns the previously loaded subject, if any.
    pub fn load_subject(&mut self, mut subject: Subject) -> Option<Subject> {
        let center = subject.bounds.center();
        subject.transform.position -= center;
        subject.bounds = subject.bounds.translated(-center);

        let d = subject.bounds.max_dim();
        self.camera.position = Vec3::new(0.0, d, d * 2.0);
        self.camera.target = Vec3::zeros();

        tracing::debug!(subject = %subject.id, max_dim = d, "loaded subject");
        self.scene.subject.replace(subject)
    }

    /// Set the subject's yaw and pitch in degrees.
    pub fn set_orientation(&mut self, yaw_deg: f64, pitch_deg: f64) -> ReelResult<()> {
        let subject = self.scene.subject.as_mut().ok_or(ReelError::NoSubject)?;
        subject.transform.yaw_deg = yaw_deg;
        subject.transform.pitch_deg = pitch_deg;
        Ok(())
    }

    pub(crate) fn capture_scope(&mut self) -> ReelResult<CaptureScope<'_>> {
        let saved_transform = self.subject().ok_or(ReelError::NoSubject)?.transform;
        let saved_camera = self.camera;
        Ok(CaptureScope {
            ctx: self,
            saved_transform,
            saved_camera,
        })
    }
}

/// Exclusive, transient access to a [`RenderContext`] during a capture run.
///
/// Dropping the scope restores the subject transform and camera saved at creation, including on
/// early returns.
pub(crate) struct CaptureScope<'a> {
    ctx: &'a mut RenderContext,
    saved_transform: Transform,
    saved_camera: Camera,
}

impl CaptureScope<'_> {
    pub(crate) fn initial_transform(&self) -> &Transform {
        &self.saved_transform
    }

    pub(crate) fn initial_camera(&self) -> &Camera {
        &self.saved_camera
    }

    pub(crate) fn scene(&self) -> &Scene {
        &self.ctx.scene
    }

    pub(crate) fn camera(&self) -> &Camera {
        &self.ctx.camera
    }

    pub(crate) fn place(&mut self, subject_position: Vec3, camera: Camera) {
        if let Some(subject) = self.ctx.scene.subject.as_mut() {
            subject.transform.position = subject_position;
        }
        self.ctx.camera = camera;
    }
}

impl Drop for CaptureScope<'_> {
    fn drop(&mut self) {
        if let Some(subject) = self.ctx.scene.subject.as_mut() {
            subject.transform = self.saved_transform;
        }
        self.ctx.camera = self.saved_camera;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/context.rs"]
mod tests;
