//! GL texture ownership and sampling parameters.

use gl::types::{GLenum, GLuint};

use crate::check::check_gl_error;

/// Texture target for externally streamed video frames
/// (`GL_TEXTURE_EXTERNAL_OES`). Not part of core GL, so the `gl` bindings do
/// not carry it; the value comes from `GL_OES_EGL_image_external`.
pub const TEXTURE_EXTERNAL_OES: GLenum = 0x8D65;

/// One GL texture name and its target kind.
///
/// Exactly one external-video binding exists per active pipeline, plus one 2D
/// binding when the watermark strategy is active. The binding owns the name:
/// [`TextureBinding::delete`] is the sole deallocation point and is safe to
/// call repeatedly.
#[derive(Debug)]
pub struct TextureBinding {
    pub(crate) id: GLuint,
    pub(crate) target: GLenum,
}

impl TextureBinding {
    fn generate(target: GLenum) -> Self {
        let mut id: GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
        }
        check_gl_error("glGenTextures");
        Self { id, target }
    }

    /// Allocate a name for the external-video texture the host's producer
    /// streams into.
    pub(crate) fn external_video() -> Self {
        Self::generate(TEXTURE_EXTERNAL_OES)
    }

    /// Allocate a name for the 2D watermark texture.
    pub(crate) fn two_d() -> Self {
        Self::generate(gl::TEXTURE_2D)
    }

    pub(crate) fn id(&self) -> GLuint {
        self.id
    }

    pub(crate) fn bind(&self) {
        unsafe {
            gl::BindTexture(self.target, self.id);
        }
        check_gl_error("glBindTexture");
    }

    /// Sampling parameters for the video texture: min=nearest, mag=linear,
    /// clamp-to-edge on both axes. Mip-mapping is unsupported for externally
    /// streamed video textures.
    pub(crate) fn set_video_sampling_params(&self) {
        self.bind();
        unsafe {
            gl::TexParameterf(self.target, gl::TEXTURE_MIN_FILTER, gl::NEAREST as f32);
            gl::TexParameterf(self.target, gl::TEXTURE_MAG_FILTER, gl::LINEAR as f32);
            gl::TexParameteri(self.target, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(self.target, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
        }
        check_gl_error("glTexParameter video");
    }

    /// Sampling parameters for the watermark texture: linear min/mag, default
    /// wrap modes.
    pub(crate) fn set_watermark_sampling_params(&self) {
        self.bind();
        unsafe {
            gl::TexParameteri(self.target, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(self.target, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
        }
        check_gl_error("glTexParameter watermark");
    }

    /// Delete the texture name. Idempotent: the id is zeroed after the first
    /// delete and later calls touch no GL state.
    pub(crate) fn delete(&mut self) {
        if self.id == 0 {
            return;
        }
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
        check_gl_error("glDeleteTextures");
        self.id = 0;
    }
}
