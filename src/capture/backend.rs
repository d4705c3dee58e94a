use crate::capture::ascii::{AsciiRasterizer, CharRamp};
use crate::capture::context::{Camera, Scene};
use crate::foundation::error::ReelResult;
use image::GrayImage;
use std::future::Future;

/// Rendering collaborator consumed by the capture pipeline.
///
/// The pipeline awaits [`RenderBackend::render_frame`] and only then calls
/// [`RenderBackend::rasterize`]. When the backend does not signal completion, the pipeline also
/// waits the configured settle delay in between.
pub trait RenderBackend {
    /// Handle to a rendered raster.
    type Raster;

    /// Return `true` when `render_frame` resolves only after the frame is fully drawn.
    fn signals_completion(&self) -> bool {
        false
    }

    /// Render `scene` as seen from `camera`.
    fn render_frame(
        &mut self,
        camera: &Camera,
        scene: &Scene,
    ) -> impl Future<Output = ReelResult<Self::Raster>>;

    /// Convert a raster into text rows of `width` characters drawn from `ramp`.
    ///
    /// The text may use any line-ending convention or an HTML table-cell encoding. `None` means
    /// the raster produced no renderable content.
    fn rasterize(
        &mut self,
        raster: &Self::Raster,
        width: u32,
        ramp: &CharRamp,
    ) -> ReelResult<Option<String>>;
}

/// Adapter for renderers that produce grayscale images synchronously.
///
/// Rasterization goes through the built-in [`AsciiRasterizer`].
pub struct LumaBackend<F> {
    draw: F,
    rasterizer: AsciiRasterizer,
}

impl<F> LumaBackend<F>
where
    F: FnMut(&Camera, &Scene) -> ReelResult<GrayImage>,
{
    pub fn new(draw: F, rasterizer: AsciiRasterizer) -> Self {
        Self { draw, rasterizer }
    }
}

impl<F> RenderBackend for LumaBackend<F>
where
    F: FnMut(&Camera, &Scene) -> ReelResult<GrayImage>,
{
    type Raster = GrayImage;

    fn signals_completion(&self) -> bool {
        true
    }

    async fn render_frame(&mut self, camera: &Camera, scene: &Scene) -> ReelResult<GrayImage> {
        (self.draw)(camera, scene)
    }

    fn rasterize(
        &mut self,
        raster: &GrayImage,
        width: u32,
        ramp: &CharRamp,
    ) -> ReelResult<Option<String>> {
        Ok(self.rasterizer.rasterize(raster, width, ramp))
    }
}
