//! wgpu implementation of [`RenderBackend`](crate::RenderBackend).
//!
//! Draws into an offscreen RGBA8 texture that can be read back as an image.

mod backend;
mod pipeline;
mod types;

pub use backend::WgpuBackend;
