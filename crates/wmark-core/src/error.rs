use std::fmt;

/// Pipeline-level errors surfaced by renderer initialization.
///
/// Draw-time GL errors are observational only (logged, never returned); the
/// variants here all mean the pipeline has no usable program or image and must
/// not proceed to draw.
#[derive(Debug)]
pub enum RenderError {
    /// A shader stage failed to compile. Carries the stage name and the
    /// driver's info log.
    Compile { stage: &'static str, log: String },

    /// The program failed to link. Carries the driver's info log.
    Link(String),

    /// An attribute or uniform name resolved to the "not found" sentinel.
    HandleNotFound(&'static str),

    /// A GL object (shader, program, texture name) could not be created.
    GlCreate(String),

    /// The host-supplied bitmap descriptor was unusable.
    InvalidImage(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Compile { stage, log } => {
                write!(f, "{stage} shader compile error: {log}")
            }
            RenderError::Link(log) => write!(f, "program link error: {log}"),
            RenderError::HandleNotFound(name) => {
                write!(f, "could not resolve shader handle '{name}'")
            }
            RenderError::GlCreate(msg) => write!(f, "GL object creation failed: {msg}"),
            RenderError::InvalidImage(msg) => write!(f, "invalid watermark bitmap: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}
