// src/ui/panel.rs
//! Scene control panel
//!
//! Binds the background color and the two lights to live widgets. Each
//! control is a (parameter, effect) pair: the widget edits a field in
//! [`SceneSettings`] and the app applies the settings to the renderer
//! before the next frame. Ranges are enforced by the widgets themselves.

use crate::gfx::resources::global_bindings::LightingConfig;

/// Live-editable scene parameters backing the panel widgets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub background: [f32; 3],
    pub lighting: LightingConfig,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            // 0x121212, the original near-black backdrop
            background: [0.07, 0.07, 0.07],
            lighting: LightingConfig::default(),
        }
    }
}

/// Draws the scene control panel
pub fn settings_panel(ui: &imgui::Ui, settings: &mut SceneSettings) {
    ui.window("Scene Controls")
        .size([340.0, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .build(|| {
            if ui.collapsing_header("Scene", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                ui.color_edit3("Background Color", &mut settings.background);
            }

            if ui.collapsing_header("Ambient Light", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                ui.color_edit3("Color##ambient", &mut settings.lighting.ambient_color);
                ui.slider(
                    "Intensity##ambient",
                    0.0,
                    10.0,
                    &mut settings.lighting.ambient_intensity,
                );
            }

            if ui.collapsing_header("Directional Light", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                ui.color_edit3("Color##directional", &mut settings.lighting.sun_color);
                ui.slider(
                    "Intensity##directional",
                    0.0,
                    10.0,
                    &mut settings.lighting.sun_intensity,
                );
            }
        });
}
