//! Shared value types used by every tetraview crate.

mod types;

pub use types::{Key, Vertex};
