//! The static full-screen quad every draw uses.

use gl::types::GLsizei;
use std::ffi::c_void;
use std::mem::size_of;

/// Floats per vertex: X, Y, Z, U, V interleaved.
pub const FLOATS_PER_VERTEX: usize = 5;

/// Number of vertices in the triangle strip.
pub const VERTEX_COUNT: GLsizei = 4;

/// Byte stride between consecutive vertices.
pub const STRIDE_BYTES: GLsizei = (FLOATS_PER_VERTEX * size_of::<f32>()) as GLsizei;

/// Float offset of the texture coordinates within a vertex.
pub const UV_OFFSET: usize = 3;

/// Full-screen triangle-strip quad spanning NDC [-1,1]x[-1,1] with [0,1]x[0,1]
/// texture coordinates. Immutable for the process lifetime.
#[rustfmt::skip]
const QUAD_VERTICES: [f32; FLOATS_PER_VERTEX * VERTEX_COUNT as usize] = [
    // X, Y, Z, U, V
    -1.0, -1.0, 0.0, 0.0, 0.0,
     1.0, -1.0, 0.0, 1.0, 0.0,
    -1.0,  1.0, 0.0, 0.0, 1.0,
     1.0,  1.0, 0.0, 1.0, 1.0,
];

/// Client-side vertex array for the full-screen quad.
///
/// The pipeline never allocates a GL buffer object for this; the four
/// vertices are re-pointed at every draw, matching how the host's GLES2-class
/// context is driven.
#[derive(Debug, Clone)]
pub struct QuadGeometry {
    vertices: [f32; FLOATS_PER_VERTEX * VERTEX_COUNT as usize],
}

impl Default for QuadGeometry {
    fn default() -> Self {
        Self {
            vertices: QUAD_VERTICES,
        }
    }
}

impl QuadGeometry {
    /// Pointer to the interleaved positions (3 floats per vertex, offset 0).
    pub(crate) fn position_ptr(&self) -> *const c_void {
        self.vertices.as_ptr().cast()
    }

    /// Pointer to the interleaved texture coordinates (2 floats per vertex,
    /// float offset 3).
    pub(crate) fn texcoord_ptr(&self) -> *const c_void {
        self.vertices[UV_OFFSET..].as_ptr().cast()
    }

    #[cfg(test)]
    fn vertices(&self) -> &[f32] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_full_ndc_with_unit_uvs() {
        let quad = QuadGeometry::default();
        for vertex in quad.vertices().chunks(FLOATS_PER_VERTEX) {
            let (x, y, z, u, v) = (vertex[0], vertex[1], vertex[2], vertex[3], vertex[4]);
            assert!(x == -1.0 || x == 1.0);
            assert!(y == -1.0 || y == 1.0);
            assert_eq!(z, 0.0);
            // UVs track the corner the position names.
            assert_eq!(u, (x + 1.0) / 2.0);
            assert_eq!(v, (y + 1.0) / 2.0);
        }
    }

    #[test]
    fn stride_covers_five_floats() {
        assert_eq!(STRIDE_BYTES, 20);
        assert_eq!(
            QuadGeometry::default().vertices().len(),
            FLOATS_PER_VERTEX * VERTEX_COUNT as usize
        );
    }

    #[test]
    fn texcoord_pointer_is_three_floats_past_position() {
        let quad = QuadGeometry::default();
        let base = quad.position_ptr() as usize;
        let uv = quad.texcoord_ptr() as usize;
        assert_eq!(uv - base, UV_OFFSET * std::mem::size_of::<f32>());
    }
}
