//! Application driver
//!
//! Owns the winit event loop and the per-frame sequence: advance the
//! animation, update camera and lighting uniforms, sync scene state to the
//! GPU, render the passes and overlay the tweak panel.

use cgmath::{Vector3, Zero};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::demo::{palette, Demo};
use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    },
    rendering::{render_engine::RenderEngine, LIT_SHADER},
    scene::Scene,
};
use crate::ui::{manager::UiManager, panel, SceneSettings};

pub struct WhorlApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    demo: Demo,
    settings: SceneSettings,
    lit_shader: String,
}

impl WhorlApp {
    /// Creates the application: camera, scene contents, patched shader
    ///
    /// The GPU context comes later, once the event loop hands us a window
    /// in `resumed`.
    pub fn new() -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()?;

        let mut camera = OrbitCamera::new(3.0, 0.2, 0.0, Vector3::zero(), 1.0);
        camera.bounds.min_distance = Some(0.8);
        let controller = CameraController::new(0.005, 0.1);
        let camera_manager = CameraManager::new(camera, controller);

        let mut scene = Scene::new(camera_manager);
        let demo = Demo::build(&mut scene);

        let lit_shader = palette::inject_color_cycle(LIT_SHADER)?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                demo,
                settings: SceneSettings::default(),
                lit_shader,
            },
        })
    }

    /// Runs the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("whorl")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let lit_shader = self.lit_shader.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height, &lit_shader).await
            });

            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue());

            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            let stats = self.scene.statistics();
            log::info!(
                "scene ready: {} objects, {} triangles",
                stats.object_count,
                stats.total_triangles
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Let the UI look at input first; a captured event must not reach
        // the camera
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                } else {
                    self.scene.camera_manager.process_keyboard_event(&key_event);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                // One shared clock read drives every animated attribute
                self.demo.update(&mut self.scene);
                self.scene.update();

                // Panel edits from last frame take effect here
                render_engine.set_clear_color(self.settings.background);
                render_engine.set_lighting(self.settings.lighting);
                render_engine.update(self.scene.camera_manager.camera.uniform);

                self.scene
                    .sync_gpu(render_engine.device(), render_engine.queue());

                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    let window_clone = window.clone();
                    let settings = &mut self.settings;
                    render_engine.render_frame(
                        &self.scene,
                        Some(
                            |device: &wgpu::Device,
                             queue: &wgpu::Queue,
                             encoder: &mut wgpu::CommandEncoder,
                             color_attachment: &wgpu::TextureView| {
                                ui_manager.draw(
                                    device,
                                    queue,
                                    encoder,
                                    &window_clone,
                                    color_attachment,
                                    |ui| {
                                        panel::settings_panel(ui, settings);
                                    },
                                );
                            },
                        ),
                    );
                } else {
                    render_engine.render_frame(
                        &self.scene,
                        None::<
                            fn(
                                &wgpu::Device,
                                &wgpu::Queue,
                                &mut wgpu::CommandEncoder,
                                &wgpu::TextureView,
                            ),
                        >,
                    );
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Skip camera input while the UI owns the mouse or keyboard
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            let io = ui_manager.context.io();
            if io.want_capture_mouse || io.want_capture_keyboard {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
