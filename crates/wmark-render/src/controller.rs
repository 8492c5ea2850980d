//! Pipeline lifecycle: at most one active renderer, explicit ownership.
//!
//! The controller is a plain caller-owned value; the process-wide instance
//! the native bridge exposes lives in the bridge crate, not here.

use crate::render::VideoRenderer;
use crate::watermark::WatermarkRenderer;
use wmark_core::matrix::MATRIX_LEN;
use wmark_core::{RenderError, WatermarkImage, INVALID_TEXTURE_ID};

/// Render strategy, fixed when the pipeline is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Present the video texture unchanged.
    Passthrough,
    /// Alpha-composite a watermark image over the video frame.
    Watermark,
}

#[derive(Debug)]
enum ActiveRenderer {
    Passthrough(VideoRenderer),
    Watermark(WatermarkRenderer),
}

impl ActiveRenderer {
    fn draw(&mut self) {
        match self {
            ActiveRenderer::Passthrough(r) => r.draw(),
            ActiveRenderer::Watermark(r) => r.draw(),
        }
    }

    fn texture_id(&self) -> i32 {
        match self {
            ActiveRenderer::Passthrough(r) => r.texture_id() as i32,
            ActiveRenderer::Watermark(r) => r.texture_id() as i32,
        }
    }

    fn write_transform(&self, out: &mut [f32; MATRIX_LEN]) {
        match self {
            ActiveRenderer::Passthrough(r) => r.write_transform(out),
            ActiveRenderer::Watermark(r) => r.write_transform(out),
        }
    }

    fn release(&mut self) {
        match self {
            ActiveRenderer::Passthrough(r) => r.release(),
            ActiveRenderer::Watermark(r) => r.release(),
        }
    }
}

/// Holds at most one renderer and the lifecycle state the host drives.
///
/// States: Empty, then `initialize` moves to Active (or returns the
/// initialization error and stays Empty). A second `initialize` while Active
/// is ignored entirely: no error, no image or renderer replacement — an
/// idempotence guarantee the host may rely on. `release` returns to Empty and
/// is safe in any state.
#[derive(Debug, Default)]
pub struct PipelineController {
    active: Option<ActiveRenderer>,
}

impl PipelineController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and store a watermark renderer around a deep-copied image.
    ///
    /// No-op when a renderer is already active. On error the controller stays
    /// Empty; the host decides whether to release and reinitialize.
    pub fn initialize(&mut self, image: WatermarkImage) -> Result<(), RenderError> {
        if self.active.is_some() {
            tracing::debug!("initialize ignored: pipeline already active");
            return Ok(());
        }

        let mut renderer = WatermarkRenderer::init()?;
        renderer.set_image(image);
        self.active = Some(ActiveRenderer::Watermark(renderer));
        Ok(())
    }

    /// Build and store a plain passthrough renderer. Same lifecycle rules as
    /// [`PipelineController::initialize`].
    pub fn initialize_passthrough(&mut self) -> Result<(), RenderError> {
        if self.active.is_some() {
            tracing::debug!("initialize ignored: pipeline already active");
            return Ok(());
        }

        let renderer = VideoRenderer::init()?;
        self.active = Some(ActiveRenderer::Passthrough(renderer));
        Ok(())
    }

    /// Whether a renderer is currently active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Which strategy is active, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        self.active.as_ref().map(|r| match r {
            ActiveRenderer::Passthrough(_) => Strategy::Passthrough,
            ActiveRenderer::Watermark(_) => Strategy::Watermark,
        })
    }

    /// The video texture id for the host's producer, or the -1 sentinel when
    /// Empty.
    pub fn texture_id(&self) -> i32 {
        self.active
            .as_ref()
            .map_or(INVALID_TEXTURE_ID, ActiveRenderer::texture_id)
    }

    /// Draw one frame and copy the sampling transform into `out_matrix`.
    ///
    /// Strict no-op when Empty: no GL call is made and `out_matrix` is left
    /// untouched.
    pub fn draw(&mut self, out_matrix: Option<&mut [f32; MATRIX_LEN]>) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.draw();
        if let Some(out) = out_matrix {
            active.write_transform(out);
        }
    }

    /// Destroy the active renderer and return to Empty. Safe to call any
    /// number of times, including before any `initialize`.
    pub fn release(&mut self) {
        if let Some(mut renderer) = self.active.take() {
            renderer.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::QuadGeometry;
    use crate::shader::ProgramHandles;
    use crate::texture::{TextureBinding, TEXTURE_EXTERNAL_OES};
    use wmark_core::matrix::{DEFAULT_SAMPLING_TRANSFORM, IDENTITY};

    // Renderers whose GL names are all fabricated. Ids stay zero except where
    // a test needs a visible texture id; zero ids make release/Drop skip
    // every GL call, so these are safe without a context.
    fn fabricated_renderer(texture_id: u32, image: Option<WatermarkImage>) -> WatermarkRenderer {
        WatermarkRenderer {
            base: VideoRenderer {
                program: 0,
                handles: ProgramHandles {
                    a_position: 0,
                    a_texture_coord: 0,
                    u_mvp_matrix: 0,
                    u_st_matrix: 0,
                },
                texture: TextureBinding {
                    id: texture_id,
                    target: TEXTURE_EXTERNAL_OES,
                },
                quad: QuadGeometry::default(),
                mvp_matrix: IDENTITY,
                st_matrix: DEFAULT_SAMPLING_TRANSFORM,
            },
            texture: TextureBinding {
                id: 0,
                target: gl::TEXTURE_2D,
            },
            sampler: 0,
            image,
        }
    }

    fn controller_with_active(texture_id: u32, image: Option<WatermarkImage>) -> PipelineController {
        PipelineController {
            active: Some(ActiveRenderer::Watermark(fabricated_renderer(
                texture_id, image,
            ))),
        }
    }

    fn test_image(fill: u8) -> WatermarkImage {
        WatermarkImage::from_rgba(1, 1, vec![fill; 4]).unwrap()
    }

    #[test]
    fn empty_controller_reports_invalid_texture_id() {
        let controller = PipelineController::new();
        assert_eq!(controller.texture_id(), INVALID_TEXTURE_ID);
    }

    #[test]
    fn draw_before_initialize_leaves_matrix_untouched() {
        let mut controller = PipelineController::new();
        let mut matrix = [7.0f32; MATRIX_LEN];
        controller.draw(Some(&mut matrix));
        assert_eq!(matrix, [7.0; MATRIX_LEN]);
    }

    #[test]
    fn release_is_safe_before_initialize_and_repeatedly() {
        let mut controller = PipelineController::new();
        controller.release();
        controller.release();
        controller.release();
        assert_eq!(controller.texture_id(), INVALID_TEXTURE_ID);
    }

    #[test]
    fn second_initialize_keeps_the_first_image() {
        let first = test_image(0x11);
        let mut controller = controller_with_active(0, Some(first.clone()));

        controller.initialize(test_image(0x22)).unwrap();

        let Some(ActiveRenderer::Watermark(r)) = controller.active.as_ref() else {
            panic!("renderer was replaced");
        };
        assert_eq!(r.image(), Some(&first));
    }

    #[test]
    fn texture_id_is_stable_until_release() {
        let mut controller = controller_with_active(42, None);
        assert_eq!(controller.texture_id(), 42);
        assert_eq!(controller.texture_id(), 42);

        // The fabricated id is nonzero, so keep the GL delete path from
        // running without a context.
        if let Some(ActiveRenderer::Watermark(r)) = controller.active.as_mut() {
            r.base.texture.id = 0;
        }
        controller.release();
        assert_eq!(controller.texture_id(), INVALID_TEXTURE_ID);
    }

    #[test]
    fn strategy_reports_the_active_variant() {
        let controller = controller_with_active(0, None);
        assert_eq!(controller.strategy(), Some(Strategy::Watermark));
        assert_eq!(PipelineController::new().strategy(), None);
    }
}
