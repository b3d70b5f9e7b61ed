//! WGPU-based render engine for the whorl demo
//!
//! Owns the surface, device and per-frame pass sequence: a depth-only
//! shadow pass, the main lit pass, and an optional UI overlay drawn on top
//! of the scene.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightingConfig},
        material::MaterialBindings,
        texture_resource::TextureResource,
    },
    scene::{object::DrawObject, scene::Scene},
};
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder},
    binding_types,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SHADOW_MAP_SIZE: u32 = 2048;

/// Core rendering engine managing GPU resources and draw calls
///
/// Handles surface and device management, pipeline creation, depth and
/// shadow buffers, camera/light uniform updates, and the UI overlay hook.
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,

    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,

    shadow_map: TextureResource,
    shadow_bind_group: wgpu::BindGroup,

    clear_color: wgpu::Color,
    lighting: LightingConfig,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// `lit_shader_source` is the WGSL source for the main surface shader,
    /// already run through any source patches the caller wants applied.
    ///
    /// # Panics
    /// Panics if unable to create a wgpu adapter or device.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        lit_shader_source: &str,
    ) -> RenderEngine {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .expect("Failed to create surface!");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("WGPU Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits {
                        max_texture_dimension_2d: 4096,
                        ..wgpu::Limits::downlevel_defaults()
                    },
                    memory_hints: wgpu::MemoryHints::default(),
                    trace: wgpu::Trace::Off,
                })
                .await
                .expect("Failed to request a device!")
        };

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            // The animation derives everything from elapsed time, so sync
            // presentation to the display refresh.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");
        let shadow_map = TextureResource::create_shadow_map(&device, SHADOW_MAP_SIZE);

        // Global uniforms (camera + lights), bound at slot 0 everywhere
        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        // Per-object transform layout, slot 1
        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Material layout, slot 2; all materials share it
        let temp_material_bindings = MaterialBindings::new(&device);
        let material_bind_group_layout = temp_material_bindings.bind_group_layouts().clone();

        // Shadow map + comparison sampler, slot 3
        let shadow_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::depth_texture_2d())
            .next_binding_fragment(binding_types::comparison_sampler())
            .create(&device, "Shadow Bind Group");

        let shadow_bind_group = BindGroupBuilder::new(&shadow_layout)
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(&device, "Shadow Bind Group");

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("lit", lit_shader_source);
        pipeline_manager.load_shader("shadow", include_str!("shadow_pass.wgsl"));

        // Depth-only shadow pass; no culling so both sides of the open
        // surface cast shadow
        pipeline_manager.register_pipeline(
            "Shadow",
            PipelineConfig::default()
                .with_label("SHADOW")
                .with_shader("shadow")
                .with_vertex_only()
                .with_depth_stencil(shadow_map.texture.clone())
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_bind_group_layout.clone(),
                ])
                .with_color_targets(vec![]),
        );

        // Main lit pass; double-sided for the helicoid
        pipeline_manager.register_pipeline(
            "Lit",
            PipelineConfig::default()
                .with_label("LIT")
                .with_shader("lit")
                .with_depth_stencil(depth_texture.texture.clone())
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layouts().clone(),
                    transform_bind_group_layout,
                    material_bind_group_layout,
                    shadow_layout.layout.clone(),
                ])
                .with_color_targets(vec![Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })]),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in &errors {
                log::error!("{}", error);
            }
        }

        RenderEngine {
            device: device_handle,
            config,
            format,
            surface,
            queue: queue_handle,
            depth_texture,
            pipeline_manager,
            global_bindings,
            global_ubo,
            shadow_map,
            shadow_bind_group,
            clear_color: background_to_clear_color([0.07, 0.07, 0.07]),
            lighting: LightingConfig::default(),
        }
    }

    /// Renders a frame: shadow pass, main pass, optional UI overlay
    ///
    /// # Arguments
    /// * `scene` - Scene containing objects to render
    /// * `ui_callback` - Optional function that records UI draw commands on
    ///   top of the finished scene
    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: Option<F>)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self
            .surface
            .get_current_texture()
            .expect("Failed to get surface texture!");

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: light-space depth. The scene animates every frame, so the
        // map is regenerated unconditionally.
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            shadow_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

            if let Some(shadow_pipeline) = self.pipeline_manager.get_pipeline("Shadow") {
                shadow_pass.set_pipeline(shadow_pipeline);

                for object in scene.objects.iter() {
                    if object.visible {
                        shadow_pass.draw_object(object);
                    }
                }
            }
        }

        // PASS 2: main lit rendering
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);
            render_pass.set_bind_group(3, &self.shadow_bind_group, &[]);

            if let Some(pipeline) = self.pipeline_manager.get_pipeline("Lit") {
                render_pass.set_pipeline(pipeline);

                for object in scene.objects.iter() {
                    if object.visible {
                        let material = scene.get_material_for_object(object);

                        if let Some(material_bind_group) = material.get_bind_group() {
                            render_pass.set_bind_group(2, material_bind_group, &[]);
                            render_pass.draw_object(object);
                        } else {
                            log::warn!(
                                "skipping '{}': material '{}' has no GPU resources",
                                object.name,
                                material.name
                            );
                        }
                    }
                }
            }
        }

        // PASS 3: UI overlay (if provided)
        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Updates camera and lighting uniform buffers
    ///
    /// Should be called once per frame before `render_frame`.
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera_uniform,
            self.lighting,
        );
    }

    /// Replaces the lighting configuration
    ///
    /// Takes effect on the next `update()` call.
    pub fn set_lighting(&mut self, lighting: LightingConfig) {
        self.lighting = lighting;
    }

    pub fn lighting(&self) -> LightingConfig {
        self.lighting
    }

    /// Sets the background color (linear RGB)
    pub fn set_clear_color(&mut self, color: [f32; 3]) {
        self.clear_color = background_to_clear_color(color);
    }

    /// Resizes the render surface and recreates the depth buffer
    ///
    /// Zero dimensions (minimized window) are ignored. The shadow map keeps
    /// its fixed resolution.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn background_to_clear_color(color: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: color[0] as f64,
        g: color[1] as f64,
        b: color[2] as f64,
        a: 1.0,
    }
}
