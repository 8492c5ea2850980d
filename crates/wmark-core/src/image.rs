//! Owned watermark pixel buffer.

use crate::error::RenderError;

const BYTES_PER_PIXEL: usize = 4;

/// An owned RGBA8888 watermark image.
///
/// Always a deep copy of the host's bitmap memory: cloning clones the buffer,
/// dropping frees it, and nothing here ever aliases host memory. The renderer
/// uploads `bytes()` as tightly packed rows (`width * 4` bytes each).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl WatermarkImage {
    /// Takes ownership of an already tightly packed RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RenderError::InvalidImage(format!(
                "pixel buffer is {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Deep-copies a strided pixel source, tightening each row to `width * 4`
    /// bytes. `stride` is the source row pitch in bytes; hosts commonly pad
    /// rows to an alignment boundary.
    pub fn from_strided(
        width: u32,
        height: u32,
        stride: u32,
        source: &[u8],
    ) -> Result<Self, RenderError> {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let stride = stride as usize;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidImage(format!(
                "zero-sized bitmap ({width}x{height})"
            )));
        }
        if stride < row_bytes {
            return Err(RenderError::InvalidImage(format!(
                "stride {stride} is smaller than row length {row_bytes}"
            )));
        }
        if source.len() < stride * (height as usize - 1) + row_bytes {
            return Err(RenderError::InvalidImage(format!(
                "source is {} bytes, too short for {height} rows of stride {stride}",
                source.len()
            )));
        }

        let mut pixels = Vec::with_capacity(row_bytes * height as usize);
        for row in source.chunks(stride).take(height as usize) {
            pixels.extend_from_slice(&row[..row_bytes]);
        }

        tracing::debug!(width, height, stride, "copied watermark bitmap");

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA bytes, row-major, top row first.
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn tight_copy_is_byte_identical_and_non_aliasing() {
        let mut source = fill(2 * 2 * 4);
        let img = WatermarkImage::from_strided(2, 2, 8, &source).unwrap();
        assert_eq!(img.bytes(), &source[..]);

        // Mutating the source after the copy must not affect the image.
        source[0] = 0xFF;
        assert_ne!(img.bytes()[0], 0xFF);
    }

    #[test]
    fn strided_copy_drops_row_padding() {
        // 2x2 image, rows padded to 12 bytes (4 bytes of padding per row).
        let mut source = vec![0u8; 12 * 2];
        for row in 0..2 {
            for i in 0..8 {
                source[row * 12 + i] = (row * 8 + i) as u8;
            }
            for i in 8..12 {
                source[row * 12 + i] = 0xEE;
            }
        }
        let img = WatermarkImage::from_strided(2, 2, 12, &source).unwrap();
        assert_eq!(img.bytes().len(), 16);
        assert_eq!(img.bytes(), (0u8..16).collect::<Vec<_>>().as_slice());
        assert!(!img.bytes().contains(&0xEE));
    }

    #[test]
    fn stride_shorter_than_row_is_rejected() {
        let source = fill(16);
        assert!(WatermarkImage::from_strided(2, 2, 4, &source).is_err());
    }

    #[test]
    fn short_source_is_rejected() {
        let source = fill(8);
        assert!(WatermarkImage::from_strided(2, 2, 8, &source).is_err());
    }

    #[test]
    fn zero_sized_bitmap_is_rejected() {
        assert!(WatermarkImage::from_strided(0, 2, 8, &[]).is_err());
        assert!(WatermarkImage::from_strided(2, 0, 8, &[]).is_err());
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(WatermarkImage::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(WatermarkImage::from_rgba(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let img = WatermarkImage::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap();
        let copy = img.clone();
        drop(img);
        assert_eq!(copy.bytes(), &[1, 2, 3, 4]);
    }
}
