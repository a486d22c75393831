use crate::animator::VertexAnimator;
use crate::camera::{Camera, CameraUpdate};
use crate::mesh::Mesh;
use glam::Mat4;
use serde::{Deserialize, Serialize};
use tetraview_common::Key;

/// Tunables for a scene. Defaults reproduce the demo's fixed constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Camera translation step, and rotation step in radians.
    pub camera_speed: f32,
    /// Mesh spin about world Y, radians per frame.
    pub spin_per_frame: f64,
    /// Pull `front` back to unit length after every rotation.
    pub renormalize: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_speed: 0.1,
            spin_per_frame: VertexAnimator::DEFAULT_ANGLE,
            renormalize: false,
        }
    }
}

/// A record of every input the scene consumed, in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A camera key was applied.
    Key { key: Key, modifier: bool },
    /// The mesh advanced to the given frame.
    Stepped { frame: u64 },
}

/// The whole mutable state of the demo: one camera, one mesh, one spin.
///
/// Replaying the event log into a fresh scene with the same config yields
/// the same state.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    config: SceneConfig,
    camera: Camera,
    mesh: Mesh,
    #[serde(skip)]
    animator: VertexAnimator,
    frame: u64,
    #[serde(skip)]
    event_log: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    /// Fresh scene at frame 0 with the resting mesh and default camera pose.
    pub fn new(config: SceneConfig) -> Self {
        let camera = Camera {
            speed: config.camera_speed,
            renormalize: config.renormalize,
            ..Camera::default()
        };
        Self {
            config,
            camera,
            mesh: Mesh::tetrahedron(),
            animator: VertexAnimator::new(config.spin_per_frame),
            frame: 0,
            event_log: Vec::new(),
        }
    }

    /// Settings the scene was created with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current camera pose.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mesh vertices as of the last `step`.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Frames stepped since creation.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Events recorded since creation or the last `drain_events`.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Apply one camera key press and log the resulting camera state.
    pub fn handle_key(&mut self, key: Key, modifier: bool) -> CameraUpdate {
        let update = self.camera.handle_key(key, modifier);
        match update {
            CameraUpdate::Moved(p) => {
                tracing::debug!(?key, "camera moved to ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
            }
            CameraUpdate::Rotated(f) => {
                tracing::debug!(?key, "camera facing ({:.3}, {:.3}, {:.3})", f.x, f.y, f.z);
            }
            CameraUpdate::Ignored => {
                tracing::trace!(?key, "key not bound to camera");
                return update;
            }
        }
        self.event_log.push(SceneEvent::Key { key, modifier });
        update
    }

    /// Advance one frame: spin the mesh by the fixed per-frame angle.
    pub fn step(&mut self) {
        self.animator.rotate_frame(&mut self.mesh.vertices);
        self.frame += 1;
        self.event_log.push(SceneEvent::Stepped { frame: self.frame });
    }

    /// View matrix of the current camera.
    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    /// Rebuild a scene by feeding `events` into a fresh one.
    pub fn replay(config: SceneConfig, events: &[SceneEvent]) -> Self {
        let mut scene = Self::new(config);
        for event in events {
            match *event {
                SceneEvent::Key { key, modifier } => {
                    scene.handle_key(key, modifier);
                }
                SceneEvent::Stepped { .. } => scene.step(),
            }
        }
        scene
    }

    /// FNV-1a over the frame counter, camera vectors and vertex positions.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.frame.to_le_bytes());
        for v in [self.camera.position, self.camera.front, self.camera.up] {
            for c in v.to_array() {
                mix(&c.to_le_bytes());
            }
        }
        for vertex in &self.mesh.vertices {
            for c in vertex.position.to_array() {
                mix(&c.to_le_bytes());
            }
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn scene_starts_at_frame_zero() {
        let scene = Scene::default();
        assert_eq!(scene.frame(), 0);
        assert_eq!(scene.mesh(), &Mesh::tetrahedron());
        assert_eq!(scene.camera().position, Vec3::new(0.3, 0.2, 1.0));
        assert!(scene.events().is_empty());
    }

    #[test]
    fn config_flows_into_camera() {
        let scene = Scene::new(SceneConfig {
            camera_speed: 0.5,
            renormalize: true,
            ..SceneConfig::default()
        });
        assert_eq!(scene.camera().speed, 0.5);
        assert!(scene.camera().renormalize);
    }

    #[test]
    fn step_spins_mesh_and_counts_frames() {
        let mut scene = Scene::default();
        scene.step();
        scene.step();
        assert_eq!(scene.frame(), 2);
        assert_ne!(scene.mesh(), &Mesh::tetrahedron());
        assert_eq!(scene.events().len(), 2);
    }

    #[test]
    fn ignored_keys_are_not_logged() {
        let mut scene = Scene::default();
        let hash = scene.state_hash();
        assert_eq!(scene.handle_key(Key::Other(7), true), CameraUpdate::Ignored);
        assert!(scene.events().is_empty());
        assert_eq!(scene.state_hash(), hash);
    }

    #[test]
    fn initial_view_matches_look_at() {
        let scene = Scene::default();
        let expected = Mat4::look_at_rh(
            Vec3::new(0.3, 0.2, 1.0),
            Vec3::new(0.3, 0.2, 1.0) + Vec3::new(0.3, 0.2, -1.0),
            Vec3::new(0.3, 2.0, 1.0),
        );
        assert_eq!(scene.view_matrix(), expected);
    }

    #[test]
    fn drain_events_clears_log() {
        let mut scene = Scene::default();
        scene.handle_key(Key::Left, false);
        let events = scene.drain_events();
        assert_eq!(
            events,
            vec![SceneEvent::Key {
                key: Key::Left,
                modifier: false
            }]
        );
        assert!(scene.events().is_empty());
    }

    #[test]
    fn replay_equivalence() {
        let config = SceneConfig {
            spin_per_frame: 0.01,
            ..SceneConfig::default()
        };
        let mut scene = Scene::new(config);
        scene.handle_key(Key::Left, true);
        for _ in 0..10 {
            scene.step();
        }
        scene.handle_key(Key::Up, false);
        scene.handle_key(Key::Other(1), false);
        scene.step();

        let replayed = Scene::replay(config, scene.events());
        assert_eq!(replayed.frame(), scene.frame());
        assert_eq!(replayed.state_hash(), scene.state_hash());
        assert_eq!(replayed.events(), scene.events());
    }

    #[test]
    fn different_input_diverges() {
        let mut a = Scene::default();
        let mut b = Scene::default();
        a.handle_key(Key::Left, false);
        b.handle_key(Key::Right, false);
        assert_ne!(a.state_hash(), b.state_hash());
    }
}
