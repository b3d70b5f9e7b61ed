use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Translates raw mouse input into orbit camera motion
///
/// Left drag orbits, the scroll wheel zooms, shift + drag pans.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left mouse button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    if self.is_shift_held {
                        camera.pan((
                            -delta.0 as f32 * self.pan_speed,
                            delta.1 as f32 * self.pan_speed,
                        ));
                    } else {
                        camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                        camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                    }
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent) {
        if let KeyEvent {
            physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
            state,
            ..
        } = event
        {
            self.is_shift_held = *state == ElementState::Pressed;
        }
    }
}
