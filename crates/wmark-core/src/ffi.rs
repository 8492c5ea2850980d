//! C-repr types shared with the host across the native bridge.

/// Sentinel returned by `wmark_get_texture_id` while no pipeline is active.
pub const INVALID_TEXTURE_ID: i32 = -1;

/// Bitmap descriptor passed to `wmark_initialize`.
///
/// `pixels` must point to RGBA8888 pixel memory that stays locked for the
/// duration of the call; the bridge deep-copies it and never retains the
/// pointer. `stride` is the row pitch in bytes and may exceed `width * 4`
/// when the host pads rows to an alignment boundary.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct WmarkBitmap {
    pub pixels: *const u8,
    pub width: u32,
    pub height: u32,
    pub stride: u32,
}

impl WmarkBitmap {
    /// Byte length of the pixel memory described by this descriptor.
    pub fn byte_len(&self) -> usize {
        self.stride as usize * self.height as usize
    }
}
