//! # User Interface Module
//!
//! Dear ImGui integration for the tweak panel: [`UiManager`] wires imgui to
//! winit and wgpu, [`panel`] holds the scene controls. When the UI captures
//! the mouse or keyboard, camera input is suppressed.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{settings_panel, SceneSettings};
