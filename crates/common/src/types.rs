use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A keyboard key as seen by the scene.
///
/// Only the four arrow keys drive the camera. Every other key is `Other`;
/// its code is whatever the host chooses to report and may be 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Other(u32),
}

impl Key {
    /// Parse a key name as used on the command line (`left`, `up`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    pub fn is_arrow(self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// One mesh vertex: position plus RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
}

impl Vertex {
    /// Number of floats a vertex occupies in the interleaved GPU buffer.
    pub const FLOATS: usize = 6;

    pub const fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }

    /// Interleaved `[x, y, z, r, g, b]`.
    pub fn to_array(&self) -> [f32; Self::FLOATS] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.color.x,
            self.color.y,
            self.color.z,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse_case_insensitively() {
        assert_eq!(Key::from_name("Left"), Some(Key::Left));
        assert_eq!(Key::from_name(" down "), Some(Key::Down));
        assert_eq!(Key::from_name("space"), None);
    }

    #[test]
    fn only_arrows_are_arrows() {
        assert!(Key::Up.is_arrow());
        assert!(!Key::Other(65).is_arrow());
    }

    #[test]
    fn vertex_interleaves_position_then_color() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
    }
}
