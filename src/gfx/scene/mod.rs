//! # Scene Management Module
//!
//! Object and scene containers for the demo: meshes built from procedural
//! geometry, per-object transforms with GPU-side uniform buffers, and the
//! scene that ties objects, materials and the camera together.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Mesh, Object};
pub use scene::Scene;
pub use vertex::Vertex3D;
