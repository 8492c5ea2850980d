//! 4x4 matrix constants shared between the vertex stage and the host.
//!
//! All matrices are 16 floats in column-major order, the layout
//! `glUniformMatrix4fv` consumes with `transpose = GL_FALSE`.

/// Number of floats in a 4x4 matrix.
pub const MATRIX_LEN: usize = 16;

/// Identity, uploaded as the model-view-projection matrix every draw.
pub const IDENTITY: [f32; MATRIX_LEN] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Default sampling transform: a reflect-Y identity.
///
/// Video producers deliver frames with the first row at the top, while GL
/// texture coordinates put v=0 at the bottom; this maps v to 1-v. The
/// renderer resets its sampling transform to this value at the start of every
/// draw; the producer may overwrite it before composition.
pub const DEFAULT_SAMPLING_TRANSFORM: [f32; MATRIX_LEN] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, -1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 1.0, 0.0, 1.0,
];
