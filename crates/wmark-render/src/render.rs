//! Video-passthrough render strategy.

use gl::types::GLuint;

use crate::check::{check_gl_error, clear_gl_errors};
use crate::geometry::{QuadGeometry, STRIDE_BYTES, VERTEX_COUNT};
use crate::shader::{self, ProgramHandles};
use crate::texture::TextureBinding;
use wmark_core::matrix::{DEFAULT_SAMPLING_TRANSFORM, IDENTITY, MATRIX_LEN};
use wmark_core::RenderError;

/// Samples the external video texture and presents it unchanged.
///
/// Lifecycle: [`VideoRenderer::init`] either yields a renderer in the Ready
/// state or an error (there is no half-built value to misuse). `draw` repeats
/// freely; [`VideoRenderer::release`] is terminal and idempotent, and also
/// runs on drop.
#[derive(Debug)]
pub struct VideoRenderer {
    pub(crate) program: GLuint,
    pub(crate) handles: ProgramHandles,
    pub(crate) texture: TextureBinding,
    pub(crate) quad: QuadGeometry,
    pub(crate) mvp_matrix: [f32; MATRIX_LEN],
    pub(crate) st_matrix: [f32; MATRIX_LEN],
}

impl VideoRenderer {
    /// Build the passthrough pipeline: external-video texture, default
    /// shader pair, resolved handles.
    pub fn init() -> Result<Self, RenderError> {
        Self::init_with_fragment(shader::FRAGMENT_SHADER)
    }

    /// Shared construction path; the watermark strategy swaps in its blend
    /// fragment stage.
    pub(crate) fn init_with_fragment(frag_src: &str) -> Result<Self, RenderError> {
        clear_gl_errors();

        let mut texture = TextureBinding::external_video();
        texture.bind();

        let program = match shader::link_program(shader::VERTEX_SHADER, frag_src) {
            Ok(p) => p,
            Err(e) => {
                texture.delete();
                return Err(e);
            }
        };

        let handles = match ProgramHandles::resolve(program) {
            Ok(h) => h,
            Err(e) => {
                unsafe { gl::DeleteProgram(program) };
                texture.delete();
                return Err(e);
            }
        };

        texture.set_video_sampling_params();

        tracing::debug!(texture_id = texture.id(), program, "video renderer ready");

        Ok(Self {
            program,
            handles,
            texture,
            quad: QuadGeometry::default(),
            mvp_matrix: IDENTITY,
            st_matrix: DEFAULT_SAMPLING_TRANSFORM,
        })
    }

    /// Full passthrough frame: clear, bind, attributes, matrices, draw call.
    pub fn draw(&mut self) {
        self.draw_start();
        self.draw_setup_matrix();
        self.draw_finish();
    }

    /// Clear, activate the program, bind the video texture to unit 0, and
    /// point both vertex attributes at the quad.
    pub(crate) fn draw_start(&self) {
        unsafe {
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
            gl::Clear(gl::DEPTH_BUFFER_BIT | gl::COLOR_BUFFER_BIT);
            check_gl_error("glClear");

            gl::UseProgram(self.program);
            check_gl_error("glUseProgram");

            gl::ActiveTexture(gl::TEXTURE0);
            self.texture.bind();

            gl::VertexAttribPointer(
                self.handles.a_position as GLuint,
                3,
                gl::FLOAT,
                gl::FALSE,
                STRIDE_BYTES,
                self.quad.position_ptr(),
            );
            check_gl_error("glVertexAttribPointer aPosition");
            gl::EnableVertexAttribArray(self.handles.a_position as GLuint);
            check_gl_error("glEnableVertexAttribArray aPosition");

            gl::VertexAttribPointer(
                self.handles.a_texture_coord as GLuint,
                2,
                gl::FLOAT,
                gl::FALSE,
                STRIDE_BYTES,
                self.quad.texcoord_ptr(),
            );
            check_gl_error("glVertexAttribPointer aTextureCoord");
            gl::EnableVertexAttribArray(self.handles.a_texture_coord as GLuint);
            check_gl_error("glEnableVertexAttribArray aTextureCoord");
        }
    }

    /// Reset the sampling transform to the default and upload both matrices.
    ///
    /// The producer overwrites the transform externally between draws when
    /// its buffer layout changes; resetting here keeps a stale transform from
    /// leaking into the next frame.
    pub(crate) fn draw_setup_matrix(&mut self) {
        self.st_matrix = DEFAULT_SAMPLING_TRANSFORM;
        self.mvp_matrix = IDENTITY;
        unsafe {
            gl::UniformMatrix4fv(
                self.handles.u_mvp_matrix,
                1,
                gl::FALSE,
                self.mvp_matrix.as_ptr(),
            );
            gl::UniformMatrix4fv(
                self.handles.u_st_matrix,
                1,
                gl::FALSE,
                self.st_matrix.as_ptr(),
            );
        }
        check_gl_error("glUniformMatrix4fv");
    }

    /// The actual draw call.
    pub(crate) fn draw_finish(&self) {
        unsafe {
            gl::DrawArrays(gl::TRIANGLE_STRIP, 0, VERTEX_COUNT);
        }
        check_gl_error("glDrawArrays");
    }

    /// The external-video texture id the host binds its producer to.
    pub fn texture_id(&self) -> GLuint {
        self.texture.id()
    }

    /// Copy the current 16-float sampling transform into `out`.
    pub fn write_transform(&self, out: &mut [f32; MATRIX_LEN]) {
        out.copy_from_slice(&self.st_matrix);
    }

    /// Delete the GPU resources. Safe to call repeatedly; ids are zeroed
    /// after the first call.
    pub fn release(&mut self) {
        self.texture.delete();
        if self.program != 0 {
            unsafe { gl::DeleteProgram(self.program) };
            check_gl_error("glDeleteProgram");
            self.program = 0;
        }
    }
}

impl Drop for VideoRenderer {
    fn drop(&mut self) {
        self.release();
    }
}
