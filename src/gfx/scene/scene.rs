use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{Material, MaterialManager},
};

use super::object::Object;

/// Main scene containing objects, materials, and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds an object and returns its index
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Adds a material to the material manager
    pub fn add_material(&mut self, material: Material) {
        self.material_manager.add_material(material);
    }

    /// Gets mutable reference to an object by index
    pub fn object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Gets immutable reference to an object by index
    pub fn object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before
    /// rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Syncs per-frame CPU state (transforms, material uniforms) to the GPU
    pub fn sync_gpu(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in &self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Gets material for rendering an object
    ///
    /// Falls back to the default material if the object has none assigned
    /// or the assigned material does not exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.material_id())
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.index_count() / 3).sum::<u32>())
            .sum();

        let total_vertices: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.vertex_count()).sum::<u32>())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}
