//! Native bridge entry points for the host media-playback surface.
//!
//! Four operations, all synchronous and all expected on the one thread where
//! the host's GL context is current:
//!
//! - [`wmark_initialize`] — deep-copy a watermark bitmap and build the
//!   pipeline; ignored when already initialized.
//! - [`wmark_get_texture_id`] — the external-video texture id the host binds
//!   its producer to, or -1.
//! - [`wmark_draw`] — composite one frame and write the sampling transform
//!   back into the host's 16-float array.
//! - [`wmark_release`] — free all GPU resources.
//!
//! The active pipeline lives in a thread-local, the per-thread-GPU-state
//! pattern: calls from a thread other than the context thread see their own
//! (empty) controller and degrade to no-ops instead of racing. The controller
//! performs no mutual exclusion of its own.

use std::cell::RefCell;
use std::slice;

use anyhow::Context as _;
use once_cell::sync::OnceCell;

use wmark_core::{RenderError, WatermarkImage, WmarkBitmap};
use wmark_render::PipelineController;

static RUNTIME_INIT: OnceCell<()> = OnceCell::new();

thread_local! {
    static PIPELINE: RefCell<PipelineController> = RefCell::new(PipelineController::new());
}

/// One-time process setup: tracing subscriber and GL function pointers.
///
/// `try_init` tolerates a host that already installed a subscriber.
fn ensure_runtime() {
    RUNTIME_INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
    });
}

fn is_context_current() -> bool {
    unsafe { !gl::GetString(gl::VERSION).is_null() }
}

/// Deep-copy the host's locked bitmap memory into an owned image.
///
/// # Safety
///
/// `bitmap.pixels` must point to at least `bitmap.byte_len()` readable bytes
/// for the duration of the call.
unsafe fn copy_bitmap(bitmap: &WmarkBitmap) -> Result<WatermarkImage, RenderError> {
    if bitmap.pixels.is_null() {
        return Err(RenderError::InvalidImage("null pixel pointer".into()));
    }
    let source = slice::from_raw_parts(bitmap.pixels, bitmap.byte_len());
    WatermarkImage::from_strided(bitmap.width, bitmap.height, bitmap.stride, source)
}

/// Build the watermark pipeline around a deep copy of the host's bitmap.
///
/// The bitmap's pixel memory must already be locked by the host; it is copied
/// row by row (stride-aware) and never retained. Ignored entirely when a
/// pipeline is already active. Initialization failures are logged and leave
/// the pipeline empty: `wmark_get_texture_id` keeps returning -1 and
/// `wmark_draw` stays a no-op until `wmark_release` + re-initialize.
///
/// # Safety
///
/// `bitmap` must be null or point to a valid [`WmarkBitmap`] whose pixel
/// memory stays readable for the duration of the call. Must be called on the
/// host's GL context thread.
#[no_mangle]
pub unsafe extern "C" fn wmark_initialize(bitmap: *const WmarkBitmap) {
    let Some(bitmap) = bitmap.as_ref() else {
        return;
    };

    ensure_runtime();

    let already_active = PIPELINE.with(|cell| cell.borrow().is_active());
    if already_active {
        tracing::debug!("wmark_initialize ignored: pipeline already active");
        return;
    }

    if !is_context_current() {
        tracing::error!("wmark_initialize called without a current GL context");
        return;
    }

    let result = PIPELINE.with(|cell| -> anyhow::Result<()> {
        let image = copy_bitmap(bitmap).context("copying host bitmap")?;
        cell.borrow_mut()
            .initialize(image)
            .context("building watermark pipeline")?;
        Ok(())
    });

    match result {
        Ok(()) => tracing::debug!(
            width = bitmap.width,
            height = bitmap.height,
            "watermark pipeline initialized"
        ),
        Err(e) => tracing::error!("wmark_initialize failed: {e:#}"),
    }
}

/// The video texture id for the host to bind as its producer target, or -1
/// while uninitialized. Stable across calls until `wmark_release`.
#[no_mangle]
pub extern "C" fn wmark_get_texture_id() -> i32 {
    PIPELINE.with(|cell| cell.borrow().texture_id())
}

/// Composite one frame and write the current sampling transform into
/// `matrix` (16 floats, column-major).
///
/// `width`/`height` are accepted but not used by the compositing math;
/// reserved for future scaling. Strict no-op while uninitialized: no GL call
/// is made and `matrix` is left untouched. A null `matrix` skips the
/// write-back.
///
/// # Safety
///
/// `matrix` must be null or point to 16 writable floats. Must be called on
/// the host's GL context thread.
#[no_mangle]
pub unsafe extern "C" fn wmark_draw(matrix: *mut f32, width: i32, height: i32) {
    let _ = (width, height);

    let out_matrix = if matrix.is_null() {
        None
    } else {
        Some(&mut *(matrix as *mut [f32; 16]))
    };

    PIPELINE.with(|cell| cell.borrow_mut().draw(out_matrix));
}

/// Free all GPU resources and return to the empty state. Safe to call any
/// number of times, including before any initialize.
#[no_mangle]
pub extern "C" fn wmark_release() {
    PIPELINE.with(|cell| cell.borrow_mut().release());
    tracing::debug!("watermark pipeline released");
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmark_core::INVALID_TEXTURE_ID;

    // These exercise only the uninitialized paths, which touch no GL state;
    // the initialized paths need a live context and a host surface.

    #[test]
    fn texture_id_is_sentinel_before_initialize() {
        assert_eq!(wmark_get_texture_id(), INVALID_TEXTURE_ID);
    }

    #[test]
    fn draw_before_initialize_leaves_matrix_untouched() {
        let mut matrix = [3.5f32; 16];
        unsafe { wmark_draw(matrix.as_mut_ptr(), 1280, 720) };
        assert_eq!(matrix, [3.5; 16]);
    }

    #[test]
    fn draw_tolerates_null_matrix() {
        unsafe { wmark_draw(std::ptr::null_mut(), 0, 0) };
    }

    #[test]
    fn release_is_safe_repeatedly_before_initialize() {
        wmark_release();
        wmark_release();
    }

    #[test]
    fn initialize_tolerates_null_bitmap() {
        unsafe { wmark_initialize(std::ptr::null()) };
        assert_eq!(wmark_get_texture_id(), INVALID_TEXTURE_ID);
    }

    #[test]
    fn copy_bitmap_rejects_null_pixels() {
        let bitmap = WmarkBitmap {
            pixels: std::ptr::null(),
            width: 2,
            height: 2,
            stride: 8,
        };
        assert!(unsafe { copy_bitmap(&bitmap) }.is_err());
    }

    #[test]
    fn copy_bitmap_tightens_padded_rows() {
        // 2x1 image with rows padded to 12 bytes.
        let source: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8, 0xEE, 0xEE, 0xEE, 0xEE];
        let bitmap = WmarkBitmap {
            pixels: source.as_ptr(),
            width: 2,
            height: 1,
            stride: 12,
        };
        let image = unsafe { copy_bitmap(&bitmap) }.unwrap();
        assert_eq!(image.bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn copy_bitmap_does_not_alias_host_memory() {
        let mut source: Vec<u8> = vec![9; 16];
        let bitmap = WmarkBitmap {
            pixels: source.as_ptr(),
            width: 2,
            height: 2,
            stride: 8,
        };
        let image = unsafe { copy_bitmap(&bitmap) }.unwrap();
        source[0] = 0;
        assert_eq!(image.bytes()[0], 9);
    }
}
