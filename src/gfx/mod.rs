//! # Graphics Module
//!
//! Camera, rendering pipeline, scene and GPU resource handling for the
//! whorl demo.
//!
//! - **Camera** ([`camera`]) - orbit camera with drag/zoom/pan controls
//! - **Rendering** ([`rendering`]) - shadowed forward rendering with the
//!   color-cycle material shader
//! - **Scene** ([`scene`]) - objects, meshes and transforms
//! - **Resources** ([`resources`]) - materials, uniform bindings, textures

pub mod camera;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
