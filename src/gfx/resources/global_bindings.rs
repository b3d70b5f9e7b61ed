//! Global uniform bindings for camera and lighting data
//!
//! Manages the uniform buffer and bind group for per-frame global state
//! shared by every object: camera matrices, the ambient and directional
//! lights, and the light-space matrix used for shadow lookups.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content
///
/// MUST match the `Globals` struct in the shaders exactly, including
/// padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],

    ambient_color: [f32; 3],
    ambient_intensity: f32,
    sun_color: [f32; 3],
    sun_intensity: f32,
    sun_direction: [f32; 3],
    _padding: f32,

    light_view_proj: [[f32; 4]; 4],
}

/// Ambient + directional light configuration
///
/// `sun_position` is where the directional light shines from; the light
/// always points at the origin. Colors are linear RGB, intensities match
/// the [0, 10] range exposed by the tweak panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightingConfig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub sun_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 4.0,
            sun_color: [1.0, 1.0, 1.0],
            sun_intensity: 1.0,
            sun_position: [0.0, 1.0, 1.0],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and lighting data
///
/// Called once per frame before any pass that reads globals.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: LightingConfig,
) {
    use cgmath::{EuclideanSpace, InnerSpace};

    let sun_position = cgmath::Vector3::from(lighting.sun_position);
    let sun_direction = if sun_position.magnitude2() > 0.0 {
        (-sun_position).normalize()
    } else {
        -cgmath::Vector3::unit_y()
    };

    // Light-space matrix: orthographic box around the scene, looking at the
    // origin from the sun position scaled out to clear the geometry.
    let light_eye = cgmath::Point3::from_vec(-sun_direction * 4.0);
    let light_view = cgmath::Matrix4::look_at_rh(
        light_eye,
        cgmath::Point3::new(0.0, 0.0, 0.0),
        cgmath::Vector3::unit_x(),
    );
    let light_proj = cgmath::ortho(-2.0, 2.0, -2.0, 2.0, 0.1, 10.0);
    let light_view_proj = light_proj * light_view;

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,

        ambient_color: lighting.ambient_color,
        ambient_intensity: lighting.ambient_intensity,
        sun_color: lighting.sun_color,
        sun_intensity: lighting.sun_intensity,
        sun_direction: sun_direction.into(),
        _padding: 0.0,

        light_view_proj: light_view_proj.into(),
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called before any rendering that needs global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
