//! Scene kernel: the camera, the tetrahedron mesh and the per-frame spin.
//!
//! # Invariants
//! - All state mutations flow through `Scene` operations.
//! - Nothing here touches a graphics API; renderers only read the scene.
//! - Spin is a fixed increment per frame, never scaled by elapsed time.

pub mod animator;
pub mod camera;
pub mod mesh;
pub mod scene;

pub use animator::VertexAnimator;
pub use camera::{Camera, CameraUpdate};
pub use mesh::{INDEX_COUNT, INDICES, Mesh};
pub use scene::{Scene, SceneConfig, SceneEvent};
