//! Shader compilation, linking, and handle resolution.
//!
//! The shader text is a fixed compile-time constant. The vertex stage is
//! shared; the fragment stage comes in two variants: plain video passthrough
//! and the watermark blend.

use gl::types::{GLenum, GLint, GLuint};
use std::ffi::CString;
use std::ptr;

use crate::check::check_gl_error;
use wmark_core::RenderError;

pub const VERTEX_SHADER: &str = "\
uniform mat4 uMVPMatrix;
uniform mat4 uSTMatrix;
attribute vec4 aPosition;
attribute vec4 aTextureCoord;
varying vec2 vTextureCoord;
void main() {
  gl_Position = uMVPMatrix * aPosition;
  vTextureCoord = (uSTMatrix * aTextureCoord).xy;
}
";

pub const FRAGMENT_SHADER: &str = "\
#extension GL_OES_EGL_image_external : require
precision mediump float;
varying vec2 vTextureCoord;
uniform samplerExternalOES sTexture;
void main() {
  gl_FragColor = texture2D(sTexture, vTextureCoord);
}
";

/// Source-over blend restricted to color channels; the background's own alpha
/// passes through unchanged. See `wmark_core::blend` for the CPU reference.
pub const FRAGMENT_SHADER_WATERMARK: &str = "\
#extension GL_OES_EGL_image_external : require
precision mediump float;
varying vec2 vTextureCoord;
uniform samplerExternalOES sTexture;
uniform sampler2D oTexture;
void main() {
  vec4 bg_color = texture2D(sTexture, vTextureCoord);
  vec4 fg_color = texture2D(oTexture, vTextureCoord);
  float colorR = (1.0 - fg_color.a) * bg_color.r + fg_color.a * fg_color.r;
  float colorG = (1.0 - fg_color.a) * bg_color.g + fg_color.a * fg_color.g;
  float colorB = (1.0 - fg_color.a) * bg_color.b + fg_color.a * fg_color.b;
  gl_FragColor = vec4(colorR, colorG, colorB, bg_color.a);
}
";

fn stage_name(stage: GLenum) -> &'static str {
    match stage {
        gl::VERTEX_SHADER => "vertex",
        gl::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf.as_mut_ptr().cast());
    buf.truncate(buf.iter().position(|&b| b == 0).unwrap_or(buf.len()));
    String::from_utf8_lossy(&buf).into_owned()
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr().cast());
    buf.truncate(buf.iter().position(|&b| b == 0).unwrap_or(buf.len()));
    String::from_utf8_lossy(&buf).into_owned()
}

/// Compile one shader stage. The shader object is deleted on failure.
pub(crate) fn compile_shader(stage: GLenum, source: &str) -> Result<GLuint, RenderError> {
    unsafe {
        let shader = gl::CreateShader(stage);
        if shader == 0 {
            return Err(RenderError::GlCreate(format!(
                "glCreateShader({}) returned 0",
                stage_name(stage)
            )));
        }

        let src_ptr = source.as_ptr().cast();
        let src_len = source.len() as GLint;
        gl::ShaderSource(shader, 1, &src_ptr, &src_len);
        gl::CompileShader(shader);

        let mut compiled: GLint = gl::FALSE as GLint;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut compiled);
        if compiled == gl::FALSE as GLint {
            let log = shader_info_log(shader);
            gl::DeleteShader(shader);
            return Err(RenderError::Compile {
                stage: stage_name(stage),
                log,
            });
        }
        Ok(shader)
    }
}

/// Compile both stages and link them into a program.
///
/// The stage shaders are detached and deleted once the program exists; the
/// program object is deleted if the link fails.
pub(crate) fn link_program(vert_src: &str, frag_src: &str) -> Result<GLuint, RenderError> {
    let vs = compile_shader(gl::VERTEX_SHADER, vert_src)?;
    let fs = match compile_shader(gl::FRAGMENT_SHADER, frag_src) {
        Ok(fs) => fs,
        Err(e) => {
            unsafe { gl::DeleteShader(vs) };
            return Err(e);
        }
    };

    unsafe {
        let program = gl::CreateProgram();
        if program == 0 {
            gl::DeleteShader(vs);
            gl::DeleteShader(fs);
            return Err(RenderError::GlCreate("glCreateProgram returned 0".into()));
        }

        gl::AttachShader(program, vs);
        check_gl_error("glAttachShader vertex");
        gl::AttachShader(program, fs);
        check_gl_error("glAttachShader fragment");
        gl::LinkProgram(program);

        gl::DetachShader(program, vs);
        gl::DetachShader(program, fs);
        gl::DeleteShader(vs);
        gl::DeleteShader(fs);

        let mut linked: GLint = gl::FALSE as GLint;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut linked);
        if linked == gl::FALSE as GLint {
            let log = program_info_log(program);
            gl::DeleteProgram(program);
            return Err(RenderError::Link(log));
        }
        Ok(program)
    }
}

pub(crate) fn attrib_location(program: GLuint, name: &'static str) -> Result<GLint, RenderError> {
    let cname = CString::new(name).expect("attribute names contain no NUL");
    let loc = unsafe { gl::GetAttribLocation(program, cname.as_ptr()) };
    check_gl_error(name);
    if loc == -1 {
        return Err(RenderError::HandleNotFound(name));
    }
    Ok(loc)
}

pub(crate) fn uniform_location(program: GLuint, name: &'static str) -> Result<GLint, RenderError> {
    let cname = CString::new(name).expect("uniform names contain no NUL");
    let loc = unsafe { gl::GetUniformLocation(program, cname.as_ptr()) };
    check_gl_error(name);
    if loc == -1 {
        return Err(RenderError::HandleNotFound(name));
    }
    Ok(loc)
}

/// Handles the vertex stage exposes, resolved once after link.
///
/// Resolution failure halts renderer initialization; no draw may run against
/// unresolved handles.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProgramHandles {
    pub a_position: GLint,
    pub a_texture_coord: GLint,
    pub u_mvp_matrix: GLint,
    pub u_st_matrix: GLint,
}

impl ProgramHandles {
    pub(crate) fn resolve(program: GLuint) -> Result<Self, RenderError> {
        Ok(Self {
            a_position: attrib_location(program, "aPosition")?,
            a_texture_coord: attrib_location(program, "aTextureCoord")?,
            u_mvp_matrix: uniform_location(program, "uMVPMatrix")?,
            u_st_matrix: uniform_location(program, "uSTMatrix")?,
        })
    }
}
