use tetraview_common::Vertex;

/// Spins vertices about the world Y axis by a fixed angle per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAnimator {
    angle: f64,
    sin: f64,
    cos: f64,
}

impl Default for VertexAnimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANGLE)
    }
}

impl VertexAnimator {
    /// Radians per frame.
    pub const DEFAULT_ANGLE: f64 = 0.00004;

    pub fn new(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { angle, sin, cos }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Rotate every vertex position by one frame's angle. Y and color are untouched.
    ///
    /// The products are formed in f64: at the default angle `cos` rounds to
    /// exactly 1.0 in f32.
    pub fn rotate_frame(&self, vertices: &mut [Vertex]) {
        for vertex in vertices {
            let x = vertex.position.x as f64;
            let z = vertex.position.z as f64;
            vertex.position.x = (x * self.cos + z * self.sin) as f32;
            vertex.position.z = (z * self.cos - x * self.sin) as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use std::f64::consts::TAU;

    fn radius(v: &Vertex) -> f32 {
        (v.position.x * v.position.x + v.position.z * v.position.z).sqrt()
    }

    #[test]
    fn one_frame_preserves_distance_from_axis() {
        let mut mesh = Mesh::tetrahedron();
        let before = mesh;
        VertexAnimator::default().rotate_frame(&mut mesh.vertices);

        for (a, b) in before.vertices.iter().zip(&mesh.vertices) {
            assert!((radius(a) - radius(b)).abs() < 1e-6);
            assert_eq!(a.position.y, b.position.y);
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn default_angle_actually_moves_vertices() {
        let mut mesh = Mesh::tetrahedron();
        VertexAnimator::default().rotate_frame(&mut mesh.vertices);
        // Vertex 1 sits on +Z, so x picks up z * sin(theta).
        assert!(mesh.vertices[1].position.x > 0.0);
        assert_ne!(mesh.vertices[2].position, Mesh::tetrahedron().vertices[2].position);
    }

    #[test]
    fn uses_pre_update_x_for_z() {
        let mut verts = [Vertex::new(glam::Vec3::new(1.0, 0.0, 0.0), glam::Vec3::ZERO)];
        VertexAnimator::new(std::f64::consts::FRAC_PI_2).rotate_frame(&mut verts);
        // A quarter turn sends +X to -Z. Reusing the new x would give z = 0.
        assert!(verts[0].position.abs_diff_eq(glam::Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn full_turn_returns_to_start() {
        let steps = 3600;
        let animator = VertexAnimator::new(TAU / steps as f64);
        let mut mesh = Mesh::tetrahedron();
        for _ in 0..steps {
            animator.rotate_frame(&mut mesh.vertices);
        }
        for (a, b) in Mesh::tetrahedron().vertices.iter().zip(&mesh.vertices) {
            assert!(
                a.position.abs_diff_eq(b.position, 1e-3),
                "{:?} drifted to {:?}",
                a.position,
                b.position
            );
        }
    }

    #[test]
    fn full_turn_at_default_angle_returns_to_start() {
        let animator = VertexAnimator::default();
        let steps = (TAU / VertexAnimator::DEFAULT_ANGLE).round() as usize;
        let mut mesh = Mesh::tetrahedron();
        for _ in 0..steps {
            animator.rotate_frame(&mut mesh.vertices);
        }
        for (a, b) in Mesh::tetrahedron().vertices.iter().zip(&mesh.vertices) {
            assert!(
                a.position.abs_diff_eq(b.position, 1e-4),
                "{:?} drifted to {:?}",
                a.position,
                b.position
            );
        }
    }

    #[test]
    fn empty_slice_is_fine() {
        VertexAnimator::default().rotate_frame(&mut []);
    }
}
