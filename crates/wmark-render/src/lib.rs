//! Shader pipeline for compositing a watermark over a host video texture.
//!
//! The host owns the GL context and the surface swap-chain; every call into
//! this crate must happen on the one thread where that context is current.
//! There is no internal threading or locking.
//!
//! - [`shader`] compiles/links the fixed vertex/fragment pairs and resolves
//!   their attribute and uniform handles.
//! - [`geometry`] holds the static full-screen triangle-strip quad.
//! - [`texture`] owns the GL texture names (external-video and 2D watermark).
//! - [`VideoRenderer`] samples the video texture and presents it unchanged.
//! - [`WatermarkRenderer`] alpha-composites an owned RGBA image over it.
//! - [`PipelineController`] holds at most one active renderer and drives the
//!   lifecycle the host-facing bridge exposes.
//!
//! ### Warning
//!
//! This crate issues raw GL calls and makes assumptions about the context the
//! host prepared (GLES2-class features, no VAO requirement). Using it without
//! a current context is undefined behavior.

mod check;
pub mod controller;
pub mod geometry;
pub mod render;
pub mod shader;
pub mod texture;
pub mod watermark;

pub use controller::{PipelineController, Strategy};
pub use render::VideoRenderer;
pub use watermark::WatermarkRenderer;

pub use wmark_core::RenderError;
