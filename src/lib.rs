// src/lib.rs
//! Whorl
//!
//! An animated parametric helicoid demo built on wgpu and winit: a rotating
//! helicoid surface, two orbiting icospheres, a color-cycling fragment
//! effect, orbit camera controls and a live tweak panel.

pub mod app;
pub mod demo;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::WhorlApp;
