use crate::projection::{FrameUniforms, Projection};
use glam::Mat4;
use tetraview_kernel::{INDEX_COUNT, Scene};

/// Uniform slots every backend must accept, in upload order.
pub const UNIFORM_NAMES: [&str; 3] = ["model", "view", "projection"];

/// Errors a backend reports for malformed frame commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("unknown uniform: {0}")]
    UnknownUniform(String),
    #[error("vertex upload of {0} floats is not a whole number of vertices")]
    PartialVertex(usize),
    #[error("vertex upload of {floats} floats exceeds buffer capacity of {capacity}")]
    VertexOverflow { floats: usize, capacity: usize },
    #[error("draw of {requested} indices exceeds the {available} in the index buffer")]
    IndexOutOfRange { requested: u32, available: u32 },
}

impl RenderError {
    /// Slot of a uniform in `UNIFORM_NAMES`.
    pub fn uniform_slot(name: &str) -> Result<usize, Self> {
        UNIFORM_NAMES
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| Self::UnknownUniform(name.to_string()))
    }

    pub fn check_vertices(data: &[f32]) -> Result<(), Self> {
        if data.len() % tetraview_common::Vertex::FLOATS != 0 {
            return Err(Self::PartialVertex(data.len()));
        }
        Ok(())
    }

    pub fn check_draw(index_count: u32) -> Result<(), Self> {
        if index_count > INDEX_COUNT {
            return Err(Self::IndexOutOfRange {
                requested: index_count,
                available: INDEX_COUNT,
            });
        }
        Ok(())
    }
}

/// The graphics-API side of a frame. The scene never calls a graphics API
/// directly; it only produces the values passed through here.
pub trait RenderBackend {
    type Error;

    /// Set a named matrix uniform for the next draw.
    fn set_uniform(&mut self, name: &str, value: Mat4) -> Result<(), Self::Error>;

    /// Replace the whole vertex buffer with interleaved position/color floats.
    fn upload_vertices(&mut self, data: &[f32]) -> Result<(), Self::Error>;

    /// Draw `index_count` indices from the mesh index buffer.
    fn draw(&mut self, index_count: u32) -> Result<(), Self::Error>;
}

/// Push one frame of `scene` through `backend`: the three uniforms, the
/// full mesh buffer, then an indexed draw of every face.
pub fn submit_frame<B: RenderBackend>(
    backend: &mut B,
    scene: &Scene,
    projection: &Projection,
) -> Result<FrameUniforms, B::Error> {
    let uniforms = FrameUniforms::for_scene(scene, projection);
    backend.set_uniform("model", uniforms.model)?;
    backend.set_uniform("view", uniforms.view)?;
    backend.set_uniform("projection", uniforms.projection)?;
    backend.upload_vertices(&scene.mesh().interleaved())?;
    backend.draw(INDEX_COUNT)?;
    tracing::trace!(frame = scene.frame(), "frame submitted");
    Ok(uniforms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_slots_follow_names() {
        assert_eq!(RenderError::uniform_slot("model"), Ok(0));
        assert_eq!(RenderError::uniform_slot("projection"), Ok(2));
        assert_eq!(
            RenderError::uniform_slot("mvp"),
            Err(RenderError::UnknownUniform("mvp".into()))
        );
    }

    #[test]
    fn vertex_and_draw_checks() {
        assert!(RenderError::check_vertices(&[0.0; 24]).is_ok());
        assert_eq!(
            RenderError::check_vertices(&[0.0; 7]),
            Err(RenderError::PartialVertex(7))
        );
        assert!(RenderError::check_draw(12).is_ok());
        assert!(RenderError::check_draw(13).is_err());
    }
}
