//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - The mesh buffer is re-uploaded in full every frame.
//!
//! Frames go through the `RenderBackend` trait. The GPU backend lives in
//! `tetraview-render-wgpu`; `CommandRecorder` records the same calls for
//! headless use and tests.

mod backend;
mod projection;
mod recorder;

pub use backend::{RenderBackend, RenderError, UNIFORM_NAMES, submit_frame};
pub use projection::{FrameUniforms, Projection};
pub use recorder::{CommandRecorder, RenderCommand};

pub fn crate_info() -> &'static str {
    concat!("tetraview-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
