//! # Rendering Module
//!
//! Forward renderer with a depth-only shadow pass: surface management,
//! pipeline creation, and the per-frame pass sequence
//! (shadow → main → UI overlay).

pub mod pipeline_manager;
pub mod render_engine;

/// Base lit shader for the demo surfaces
///
/// Carries the base-color anchor statement that the color-cycle patch
/// rewrites before the source is handed to the pipeline manager.
pub const LIT_SHADER: &str = include_str!("pbr.wgsl");

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
