use glam::Vec3;
use serde::{Deserialize, Serialize};
use tetraview_common::Vertex;

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Triangle list over the four tetrahedron vertices, one face per row.
#[rustfmt::skip]
pub const INDICES: [u32; 12] = [
    0, 1, 2,
    1, 2, 3,
    2, 3, 0,
    3, 0, 1,
];

pub const INDEX_COUNT: u32 = INDICES.len() as u32;

/// The four-vertex tetrahedron. Vertex order is fixed by `INDICES`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: [Vertex; 4],
}

impl Default for Mesh {
    fn default() -> Self {
        Self::tetrahedron()
    }
}

impl Mesh {
    /// Number of floats in the interleaved buffer.
    pub const FLOAT_COUNT: usize = 4 * Vertex::FLOATS;

    pub fn tetrahedron() -> Self {
        Self {
            vertices: [
                Vertex::new(Vec3::new(0.0, 1.0, 0.0), RED),
                Vertex::new(Vec3::new(0.0, -0.5, 0.866), BLUE),
                Vertex::new(Vec3::new(0.75, -0.5, -0.433), GREEN),
                Vertex::new(Vec3::new(-0.75, -0.5, -0.433), YELLOW),
            ],
        }
    }

    /// Interleaved position/color floats, ready for a full buffer upload.
    pub fn interleaved(&self) -> [f32; Self::FLOAT_COUNT] {
        let mut out = [0.0; Self::FLOAT_COUNT];
        for (chunk, vertex) in out.chunks_exact_mut(Vertex::FLOATS).zip(&self.vertices) {
            chunk.copy_from_slice(&vertex.to_array());
        }
        out
    }
}
