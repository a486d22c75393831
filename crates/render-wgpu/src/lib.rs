//! wgpu render backend for tetraview.
//!
//! Draws the tetrahedron with a position/color pipeline and a
//! model/view/projection uniform block. `WgpuFrame` implements
//! `tetraview_render::RenderBackend`, so the scene reaches the GPU only
//! through `submit_frame`.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - The vertex buffer is rewritten in full every frame.

mod context;
mod gpu;
mod shaders;

pub use context::{GpuContext, GpuError};
pub use gpu::{CLEAR_COLOR, WgpuFrame, WgpuRenderer};
