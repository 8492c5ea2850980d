//! Watermark blend strategy, built on the passthrough renderer.

use gl::types::{GLint, GLsizei};

use crate::check::check_gl_error;
use crate::render::VideoRenderer;
use crate::shader::{self, uniform_location};
use crate::texture::TextureBinding;
use wmark_core::matrix::MATRIX_LEN;
use wmark_core::{RenderError, WatermarkImage};

/// Texture unit the watermark sampler reads from (video is on unit 0).
const WATERMARK_UNIT: GLint = 1;

/// Alpha-composites an owned RGBA image over the video frame.
///
/// Composition runs in the fragment stage (see
/// [`shader::FRAGMENT_SHADER_WATERMARK`]): source-over on the color channels,
/// background alpha passed through.
#[derive(Debug)]
pub struct WatermarkRenderer {
    pub(crate) base: VideoRenderer,
    pub(crate) texture: TextureBinding,
    pub(crate) sampler: GLint,
    pub(crate) image: Option<WatermarkImage>,
}

impl WatermarkRenderer {
    /// Build the blend pipeline: base video pipeline with the blend fragment
    /// stage, the watermark sampler handle, and the 2D watermark texture.
    pub fn init() -> Result<Self, RenderError> {
        let mut base = VideoRenderer::init_with_fragment(shader::FRAGMENT_SHADER_WATERMARK)?;

        let sampler = match uniform_location(base.program, "oTexture") {
            Ok(s) => s,
            Err(e) => {
                base.release();
                return Err(e);
            }
        };

        let texture = TextureBinding::two_d();
        texture.set_watermark_sampling_params();

        tracing::debug!(
            video_texture_id = base.texture_id(),
            watermark_texture_id = texture.id(),
            "watermark renderer ready"
        );

        Ok(Self {
            base,
            texture,
            sampler,
            image: None,
        })
    }

    /// Assign the image to composite. Must hold a valid image before the
    /// first draw that expects a visible watermark.
    pub fn set_image(&mut self, image: WatermarkImage) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&WatermarkImage> {
        self.image.as_ref()
    }

    /// Composite one frame: base setup, watermark upload and bind, draw call.
    pub fn draw(&mut self) {
        self.base.draw_start();
        self.base.draw_setup_matrix();
        self.draw_watermark();
        self.base.draw_finish();
    }

    /// Bind the watermark texture to unit 1 and upload its pixels.
    ///
    /// The full buffer is re-uploaded every frame. For a static image an
    /// upload at `set_image` time plus `glTexSubImage2D` on change would save
    /// the per-frame transfer; the re-upload is kept because the host may
    /// stream into the producer and recreate the context between frames.
    fn draw_watermark(&self) {
        let Some(image) = self.image.as_ref() else {
            return;
        };

        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + WATERMARK_UNIT as u32);
            self.texture.bind();

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as GLint,
                image.width() as GLsizei,
                image.height() as GLsizei,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.bytes().as_ptr().cast(),
            );
            check_gl_error("glTexImage2D watermark");

            gl::Uniform1i(self.sampler, WATERMARK_UNIT);
            check_gl_error("glUniform1i oTexture");
        }
    }

    pub fn texture_id(&self) -> gl::types::GLuint {
        self.base.texture_id()
    }

    pub fn write_transform(&self, out: &mut [f32; MATRIX_LEN]) {
        self.base.write_transform(out);
    }

    /// Delete all GPU resources, the owned image included. Idempotent.
    pub fn release(&mut self) {
        self.texture.delete();
        self.base.release();
        self.image = None;
    }
}

impl Drop for WatermarkRenderer {
    fn drop(&mut self) {
        self.texture.delete();
        // base cleans itself up in its own Drop.
    }
}
