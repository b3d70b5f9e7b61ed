use std::ops::Range;

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::Device;

use super::vertex::Vertex3D;

/// Triangle mesh with lazily created GPU buffers
///
/// Vertex and index buffers stay `None` until [`Mesh::init_gpu_resources`]
/// runs; a mesh without buffers is silently skipped when drawing.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// GPU resources for one object: the transform uniform and its bind group
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A renderable scene object
///
/// Owns its meshes and a model transform. The transform lives CPU-side and
/// is synced to the GPU buffer through [`Object::update_transform`].
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Matrix4<f32>,
    pub material_id: Option<String>,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Create a new object with an identity transform
    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            transform: Matrix4::identity(),
            material_id: None,
            visible: true,
            gpu_resources: None,
        }
    }

    /// Builder pattern: assign a material by id
    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    /// Set translation, replacing the current transform
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Set rotation around the Y axis, replacing the current transform
    pub fn set_rotation_y(&mut self, angle: Rad<f32>) {
        self.transform = Matrix4::from_angle_y(angle);
    }

    pub fn material_id(&self) -> Option<&String> {
        self.material_id.as_ref()
    }

    /// Sync the transform matrix to the GPU if resources exist
    pub fn update_transform(&self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    /// Get the transform bind group for rendering
    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device);
        }

        let transform_data: &[f32; 16] = self.transform.as_ref();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

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

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        if let Some(transform_bind_group) = object.get_transform_bind_group() {
            self.set_bind_group(1, transform_bind_group, &[]);
        }
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}
