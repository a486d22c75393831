use glam::{Mat4, Vec3};
use tetraview_kernel::Scene;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Right-handed perspective with a 0..1 depth range (wgpu clip space).
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// The three matrices a frame hands to the shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl FrameUniforms {
    /// Uniform scale applied to the mesh.
    pub const MODEL_SCALE: f32 = 0.5;

    /// Matrices for drawing `scene` through `projection`.
    pub fn for_scene(scene: &Scene, projection: &Projection) -> Self {
        Self {
            model: Mat4::from_scale(Vec3::splat(Self::MODEL_SCALE)),
            view: scene.view_matrix(),
            projection: projection.matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_projection() {
        let p = Projection::default();
        assert!((p.fov_y - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(p.aspect, 1.0);
        assert_eq!((p.near, p.far), (0.1, 100.0));
    }

    #[test]
    fn near_and_far_planes_map_to_depth_range() {
        let m = Projection::default().matrix();
        let near = m.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = m.project_point3(Vec3::new(0.0, 0.0, -100.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn model_halves_the_mesh() {
        let u = FrameUniforms::for_scene(&Scene::default(), &Projection::default());
        let p = u.model.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(p, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn view_comes_from_scene_camera() {
        let scene = Scene::default();
        let u = FrameUniforms::for_scene(&scene, &Projection::default());
        assert_eq!(u.view, scene.camera().view_matrix());
        assert_eq!(u.projection, Projection::default().matrix());
    }
}
