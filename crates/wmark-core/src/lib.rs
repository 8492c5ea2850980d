//! Host-bridge data model for the watermark compositor.
//!
//! This crate is GL-free: it holds the types that cross the native bridge and
//! the values both sides of the pipeline agree on.
//!
//! - [`WmarkBitmap`] is the C-repr bitmap descriptor the host hands to
//!   `wmark_initialize`.
//! - [`WatermarkImage`] is the owned, deep-copied RGBA buffer the renderer
//!   composites each frame.
//! - [`matrix`] carries the 4x4 sampling-transform constants shared with the
//!   vertex stage.
//! - [`RenderError`] is the structured failure type surfaced by pipeline
//!   initialization.

pub mod blend;
pub mod error;
pub mod ffi;
pub mod image;
pub mod matrix;

pub use error::RenderError;
pub use ffi::{WmarkBitmap, INVALID_TEXTURE_ID};
pub use image::WatermarkImage;
