//! Material system for the color-cycling surfaces
//!
//! Materials are stored centrally in [`MaterialManager`] and referenced by
//! id from scene objects. Each material's uniform block carries the shared
//! animation phase (`playhead`) that the fragment shader's cosine palette
//! reads, so the animation driver pushes the phase by mutating materials
//! and letting the per-frame GPU sync upload them.

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// GPU uniform data for materials
///
/// MUST match the `MaterialData` struct in the fragment shader exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub playhead: f32,
    _padding: f32,
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &Device, ubo: &MaterialUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Material definition shared between objects
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    playhead: f32,

    // GPU resources, shared by all objects using this material
    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            playhead: 0.0,
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl Material {
    /// Creates a new material
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGBA base color (overridden per-fragment by the
    ///   color-cycle palette once the shader patch is active)
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            playhead: 0.0,
            material_ubo: None,
            material_bindings: None,
        }
    }

    /// Sets the shared color-cycle phase
    pub fn set_playhead(&mut self, playhead: f32) {
        self.playhead = playhead;
    }

    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    /// The uniform block exactly as it is uploaded to the GPU
    pub fn uniform_content(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            playhead: self.playhead,
            _padding: 0.0,
        }
    }

    /// Updates GPU resources for this material
    ///
    /// Creates the uniform buffer and bind group on first use, then uploads
    /// the current uniform content.
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            bindings.create_bind_group(device, self.material_ubo.as_ref().unwrap());
            self.material_bindings = Some(bindings);
        }

        let uniform_data = self.uniform_content();
        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings.as_ref().map(|b| b.bind_groups())
    }
}

/// Manages all materials in the demo
///
/// Centralized storage; objects reference materials by id, so the three
/// animated surfaces share uniform layout while owning their own buffers.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };

        manager
            .materials
            .insert("default".to_string(), Material::default());

        manager
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    pub fn get_default_material(&self) -> &Material {
        self.materials.get(&self.default_material_id).unwrap()
    }

    /// Gets material for an object with fallback to default
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue);
        }
    }

    /// Material bind group layout for pipeline creation
    ///
    /// All materials share the same layout, so any initialized material's
    /// layout works.
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.materials
            .values()
            .find_map(|m| m.material_bindings.as_ref())
            .map(|b| b.bind_group_layouts())
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playhead_lands_in_uniform_block() {
        let mut material = Material::new("m", [1.0, 1.0, 1.0, 1.0], 0.5, 0.05);
        material.set_playhead(1.25);
        assert_eq!(material.uniform_content().playhead, 1.25);
    }

    #[test]
    fn test_identical_playheads_produce_identical_uniforms() {
        let phase = 0.5 * 7.31_f32;
        let mut uniforms = Vec::new();
        for name in ["helicoid", "ball1", "ball2"] {
            let mut material = Material::new(name, [1.0, 1.0, 1.0, 1.0], 0.5, 0.05);
            material.set_playhead(phase);
            uniforms.push(material.uniform_content());
        }

        let reference = bytemuck::bytes_of(&uniforms[0]).to_vec();
        for uniform in &uniforms[1..] {
            assert_eq!(bytemuck::bytes_of(uniform), reference.as_slice());
        }
    }

    #[test]
    fn test_manager_falls_back_to_default() {
        let manager = MaterialManager::new();
        let missing = "nonexistent".to_string();
        assert_eq!(
            manager.get_material_for_object(Some(&missing)).name,
            "default"
        );
        assert_eq!(manager.get_material_for_object(None).name, "default");
    }
}
